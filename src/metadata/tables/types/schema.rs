//! Column layouts of every metadata table (ECMA-335 II.22, portable PDB tables).
//!
//! The width of a column depends on the image it is read from, see
//! [`crate::metadata::tables::TableInfo::column_bytes`].

use crate::metadata::tables::{CodedIndexType, TableId};

/// The semantic kind of a column, which also determines its width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// A 1 byte constant
    U8,
    /// A 2 byte constant
    U16,
    /// A 4 byte constant
    U32,
    /// An index into the `#Strings` heap
    Str,
    /// An index into the `#Blob` heap
    Blob,
    /// An index into the `#GUID` heap
    Guid,
    /// A simple index into another table
    Table(TableId),
    /// A coded index
    Coded(CodedIndexType),
}

/// A named column of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Column name as used by ECMA-335
    pub name: &'static str,
    /// Column kind
    pub kind: ColumnKind,
}

use CodedIndexType as C;
use ColumnKind::{Blob, Coded, Guid, Str, Table, U16, U32, U8};

impl TableId {
    /// The columns of this table, in storage order
    #[must_use]
    pub fn columns(self) -> &'static [Column] {
        match self {
            TableId::Module => &[
                Column { name: "Generation", kind: U16 },
                Column { name: "Name", kind: Str },
                Column { name: "Mvid", kind: Guid },
                Column { name: "EncId", kind: Guid },
                Column { name: "EncBaseId", kind: Guid },
            ],
            TableId::TypeRef => &[
                Column { name: "ResolutionScope", kind: Coded(C::ResolutionScope) },
                Column { name: "TypeName", kind: Str },
                Column { name: "TypeNamespace", kind: Str },
            ],
            TableId::TypeDef => &[
                Column { name: "Flags", kind: U32 },
                Column { name: "TypeName", kind: Str },
                Column { name: "TypeNamespace", kind: Str },
                Column { name: "Extends", kind: Coded(C::TypeDefOrRef) },
                Column { name: "FieldList", kind: Table(TableId::Field) },
                Column { name: "MethodList", kind: Table(TableId::MethodDef) },
            ],
            TableId::FieldPtr => &[Column { name: "Field", kind: Table(TableId::Field) }],
            TableId::Field => &[
                Column { name: "Flags", kind: U16 },
                Column { name: "Name", kind: Str },
                Column { name: "Signature", kind: Blob },
            ],
            TableId::MethodPtr => &[Column { name: "Method", kind: Table(TableId::MethodDef) }],
            TableId::MethodDef => &[
                Column { name: "RVA", kind: U32 },
                Column { name: "ImplFlags", kind: U16 },
                Column { name: "Flags", kind: U16 },
                Column { name: "Name", kind: Str },
                Column { name: "Signature", kind: Blob },
                Column { name: "ParamList", kind: Table(TableId::Param) },
            ],
            TableId::ParamPtr => &[Column { name: "Param", kind: Table(TableId::Param) }],
            TableId::Param => &[
                Column { name: "Flags", kind: U16 },
                Column { name: "Sequence", kind: U16 },
                Column { name: "Name", kind: Str },
            ],
            TableId::InterfaceImpl => &[
                Column { name: "Class", kind: Table(TableId::TypeDef) },
                Column { name: "Interface", kind: Coded(C::TypeDefOrRef) },
            ],
            TableId::MemberRef => &[
                Column { name: "Class", kind: Coded(C::MemberRefParent) },
                Column { name: "Name", kind: Str },
                Column { name: "Signature", kind: Blob },
            ],
            TableId::Constant => &[
                Column { name: "Type", kind: U8 },
                Column { name: "Padding", kind: U8 },
                Column { name: "Parent", kind: Coded(C::HasConstant) },
                Column { name: "Value", kind: Blob },
            ],
            TableId::CustomAttribute => &[
                Column { name: "Parent", kind: Coded(C::HasCustomAttribute) },
                Column { name: "Type", kind: Coded(C::CustomAttributeType) },
                Column { name: "Value", kind: Blob },
            ],
            TableId::FieldMarshal => &[
                Column { name: "Parent", kind: Coded(C::HasFieldMarshal) },
                Column { name: "NativeType", kind: Blob },
            ],
            TableId::DeclSecurity => &[
                Column { name: "Action", kind: U16 },
                Column { name: "Parent", kind: Coded(C::HasDeclSecurity) },
                Column { name: "PermissionSet", kind: Blob },
            ],
            TableId::ClassLayout => &[
                Column { name: "PackingSize", kind: U16 },
                Column { name: "ClassSize", kind: U32 },
                Column { name: "Parent", kind: Table(TableId::TypeDef) },
            ],
            TableId::FieldLayout => &[
                Column { name: "Offset", kind: U32 },
                Column { name: "Field", kind: Table(TableId::Field) },
            ],
            TableId::StandAloneSig => &[Column { name: "Signature", kind: Blob }],
            TableId::EventMap => &[
                Column { name: "Parent", kind: Table(TableId::TypeDef) },
                Column { name: "EventList", kind: Table(TableId::Event) },
            ],
            TableId::EventPtr => &[Column { name: "Event", kind: Table(TableId::Event) }],
            TableId::Event => &[
                Column { name: "EventFlags", kind: U16 },
                Column { name: "Name", kind: Str },
                Column { name: "EventType", kind: Coded(C::TypeDefOrRef) },
            ],
            TableId::PropertyMap => &[
                Column { name: "Parent", kind: Table(TableId::TypeDef) },
                Column { name: "PropertyList", kind: Table(TableId::Property) },
            ],
            TableId::PropertyPtr => &[Column { name: "Property", kind: Table(TableId::Property) }],
            TableId::Property => &[
                Column { name: "Flags", kind: U16 },
                Column { name: "Name", kind: Str },
                Column { name: "Type", kind: Blob },
            ],
            TableId::MethodSemantics => &[
                Column { name: "Semantics", kind: U16 },
                Column { name: "Method", kind: Table(TableId::MethodDef) },
                Column { name: "Association", kind: Coded(C::HasSemantics) },
            ],
            TableId::MethodImpl => &[
                Column { name: "Class", kind: Table(TableId::TypeDef) },
                Column { name: "MethodBody", kind: Coded(C::MethodDefOrRef) },
                Column { name: "MethodDeclaration", kind: Coded(C::MethodDefOrRef) },
            ],
            TableId::ModuleRef => &[Column { name: "Name", kind: Str }],
            TableId::TypeSpec => &[Column { name: "Signature", kind: Blob }],
            TableId::ImplMap => &[
                Column { name: "MappingFlags", kind: U16 },
                Column { name: "MemberForwarded", kind: Coded(C::MemberForwarded) },
                Column { name: "ImportName", kind: Str },
                Column { name: "ImportScope", kind: Table(TableId::ModuleRef) },
            ],
            TableId::FieldRVA => &[
                Column { name: "RVA", kind: U32 },
                Column { name: "Field", kind: Table(TableId::Field) },
            ],
            TableId::EncLog => &[Column { name: "Token", kind: U32 }, Column { name: "FuncCode", kind: U32 }],
            TableId::EncMap => &[Column { name: "Token", kind: U32 }],
            TableId::Assembly => &[
                Column { name: "HashAlgId", kind: U32 },
                Column { name: "MajorVersion", kind: U16 },
                Column { name: "MinorVersion", kind: U16 },
                Column { name: "BuildNumber", kind: U16 },
                Column { name: "RevisionNumber", kind: U16 },
                Column { name: "Flags", kind: U32 },
                Column { name: "PublicKey", kind: Blob },
                Column { name: "Name", kind: Str },
                Column { name: "Culture", kind: Str },
            ],
            TableId::AssemblyProcessor => &[Column { name: "Processor", kind: U32 }],
            TableId::AssemblyOS => &[
                Column { name: "OSPlatformID", kind: U32 },
                Column { name: "OSMajorVersion", kind: U32 },
                Column { name: "OSMinorVersion", kind: U32 },
            ],
            TableId::AssemblyRef => &[
                Column { name: "MajorVersion", kind: U16 },
                Column { name: "MinorVersion", kind: U16 },
                Column { name: "BuildNumber", kind: U16 },
                Column { name: "RevisionNumber", kind: U16 },
                Column { name: "Flags", kind: U32 },
                Column { name: "PublicKeyOrToken", kind: Blob },
                Column { name: "Name", kind: Str },
                Column { name: "Culture", kind: Str },
                Column { name: "HashValue", kind: Blob },
            ],
            TableId::AssemblyRefProcessor => &[
                Column { name: "Processor", kind: U32 },
                Column { name: "AssemblyRef", kind: Table(TableId::AssemblyRef) },
            ],
            TableId::AssemblyRefOS => &[
                Column { name: "OSPlatformID", kind: U32 },
                Column { name: "OSMajorVersion", kind: U32 },
                Column { name: "OSMinorVersion", kind: U32 },
                Column { name: "AssemblyRef", kind: Table(TableId::AssemblyRef) },
            ],
            TableId::File => &[
                Column { name: "Flags", kind: U32 },
                Column { name: "Name", kind: Str },
                Column { name: "HashValue", kind: Blob },
            ],
            TableId::ExportedType => &[
                Column { name: "Flags", kind: U32 },
                Column { name: "TypeDefId", kind: U32 },
                Column { name: "TypeName", kind: Str },
                Column { name: "TypeNamespace", kind: Str },
                Column { name: "Implementation", kind: Coded(C::Implementation) },
            ],
            TableId::ManifestResource => &[
                Column { name: "Offset", kind: U32 },
                Column { name: "Flags", kind: U32 },
                Column { name: "Name", kind: Str },
                Column { name: "Implementation", kind: Coded(C::Implementation) },
            ],
            TableId::NestedClass => &[
                Column { name: "NestedClass", kind: Table(TableId::TypeDef) },
                Column { name: "EnclosingClass", kind: Table(TableId::TypeDef) },
            ],
            TableId::GenericParam => &[
                Column { name: "Number", kind: U16 },
                Column { name: "Flags", kind: U16 },
                Column { name: "Owner", kind: Coded(C::TypeOrMethodDef) },
                Column { name: "Name", kind: Str },
            ],
            TableId::MethodSpec => &[
                Column { name: "Method", kind: Coded(C::MethodDefOrRef) },
                Column { name: "Instantiation", kind: Blob },
            ],
            TableId::GenericParamConstraint => &[
                Column { name: "Owner", kind: Table(TableId::GenericParam) },
                Column { name: "Constraint", kind: Coded(C::TypeDefOrRef) },
            ],
            TableId::Document => &[
                Column { name: "Name", kind: Blob },
                Column { name: "HashAlgorithm", kind: Guid },
                Column { name: "Hash", kind: Blob },
                Column { name: "Language", kind: Guid },
            ],
            TableId::MethodDebugInformation => &[
                Column { name: "Document", kind: Table(TableId::Document) },
                Column { name: "SequencePoints", kind: Blob },
            ],
            TableId::LocalScope => &[
                Column { name: "Method", kind: Table(TableId::MethodDef) },
                Column { name: "ImportScope", kind: Table(TableId::ImportScope) },
                Column { name: "VariableList", kind: Table(TableId::LocalVariable) },
                Column { name: "ConstantList", kind: Table(TableId::LocalConstant) },
                Column { name: "StartOffset", kind: U32 },
                Column { name: "Length", kind: U32 },
            ],
            TableId::LocalVariable => &[
                Column { name: "Attributes", kind: U16 },
                Column { name: "Index", kind: U16 },
                Column { name: "Name", kind: Str },
            ],
            TableId::LocalConstant => &[Column { name: "Name", kind: Str }, Column { name: "Signature", kind: Blob }],
            TableId::ImportScope => &[
                Column { name: "Parent", kind: Table(TableId::ImportScope) },
                Column { name: "Imports", kind: Blob },
            ],
            TableId::StateMachineMethod => &[
                Column { name: "MoveNextMethod", kind: Table(TableId::MethodDef) },
                Column { name: "KickoffMethod", kind: Table(TableId::MethodDef) },
            ],
            TableId::CustomDebugInformation => &[
                Column { name: "Parent", kind: Coded(C::HasCustomDebugInformation) },
                Column { name: "Kind", kind: Guid },
                Column { name: "Value", kind: Blob },
            ],
        }
    }

    /// Position of the column named `name`
    #[must_use]
    pub fn column_index(self, name: &str) -> Option<usize> {
        self.columns().iter().position(|column| column.name == name)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_table_has_columns() {
        for table in TableId::iter() {
            assert!(!table.columns().is_empty(), "{table} has no columns");
        }
    }

    #[test]
    fn lookup() {
        assert_eq!(TableId::Assembly.columns().len(), 9);
        assert_eq!(TableId::Assembly.column_index("PublicKey"), Some(6));
        assert_eq!(TableId::Module.column_index("EncBaseId"), Some(4));
        assert_eq!(TableId::Module.column_index("Nope"), None);
        assert_eq!(
            TableId::EncLog.columns(),
            &[
                Column { name: "Token", kind: ColumnKind::U32 },
                Column { name: "FuncCode", kind: ColumnKind::U32 },
            ]
        );
        assert_eq!(
            TableId::TypeDef.columns()[5].kind,
            ColumnKind::Table(TableId::MethodDef)
        );
    }
}
