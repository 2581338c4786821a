use crate::model::{TypeKind, TypeRecord, Visibility};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeTest {
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
    Abstract,
    Sealed,
    Static,
    Generic,
    Nested,
    Public,
    Internal,
}

impl ShapeTest {
    pub fn is_match(self, record: &TypeRecord) -> bool {
        match self {
            ShapeTest::Class => record.kind == TypeKind::Class,
            ShapeTest::Interface => record.kind == TypeKind::Interface,
            ShapeTest::Struct => record.kind == TypeKind::Struct,
            ShapeTest::Enum => record.kind == TypeKind::Enum,
            ShapeTest::Delegate => record.kind == TypeKind::Delegate,
            ShapeTest::Abstract => record.is_abstract,
            ShapeTest::Sealed => record.is_sealed,
            ShapeTest::Static => record.is_static,
            ShapeTest::Generic => record.is_generic,
            ShapeTest::Nested => record.is_nested,
            ShapeTest::Public => record.visibility == Visibility::Public,
            ShapeTest::Internal => record.visibility == Visibility::Internal,
        }
    }
}
