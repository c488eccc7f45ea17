use std::{fmt, str::FromStr};

use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::{Error, Result};

/// Identifiers for the metadata tables defined in ECMA-335 II.22 and the portable PDB format.
///
/// The discriminant of each variant is the table's index byte, which is also the high byte of
/// every [`crate::metadata::token::Token`] that refers into the table. The values therefore
/// must never change.
///
/// ## Table Categories
///
/// ### Core Type System
/// - **`Module`**, **`TypeRef`**, **`TypeDef`**, **`Field`**, **`MethodDef`**, **`Param`**
/// - the `*Ptr` indirection tables emitted by unoptimized and EnC-capable compilers
///
/// ### References and Attributes
/// - **`MemberRef`**, **`CustomAttribute`**, **`StandAloneSig`**, **`TypeSpec`**, **`MethodSpec`**
///
/// ### Edit and Continue
/// - **`EncLog`**: one row per edit applied by a delta
/// - **`EncMap`**: the tokens a delta's rows map onto
///
/// ### Assembly Information
/// - **`Assembly`**, **`AssemblyRef`** and their processor / OS companions
///
/// ### Portable PDB
/// - **`Document`** through **`CustomDebugInformation`** (0x30 - 0x37)
///
/// ## Reference
/// * [ECMA-335 Partition II, Section 22](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf) - Metadata Tables
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, EnumIter, EnumCount, Hash)]
pub enum TableId {
    /// `Module` table (0x00), exactly one row describing the module itself
    Module = 0x00,
    /// `TypeRef` table (0x01)
    TypeRef = 0x01,
    /// `TypeDef` table (0x02)
    TypeDef = 0x02,
    /// `FieldPtr` table (0x03)
    FieldPtr = 0x03,
    /// `Field` table (0x04)
    Field = 0x04,
    /// `MethodPtr` table (0x05)
    MethodPtr = 0x05,
    /// `MethodDef` table (0x06), displayed as `Method`
    MethodDef = 0x06,
    /// `ParamPtr` table (0x07)
    ParamPtr = 0x07,
    /// `Param` table (0x08)
    Param = 0x08,
    /// `InterfaceImpl` table (0x09)
    InterfaceImpl = 0x09,
    /// `MemberRef` table (0x0A)
    MemberRef = 0x0A,
    /// `Constant` table (0x0B)
    Constant = 0x0B,
    /// `CustomAttribute` table (0x0C)
    CustomAttribute = 0x0C,
    /// `FieldMarshal` table (0x0D)
    FieldMarshal = 0x0D,
    /// `DeclSecurity` table (0x0E)
    DeclSecurity = 0x0E,
    /// `ClassLayout` table (0x0F)
    ClassLayout = 0x0F,
    /// `FieldLayout` table (0x10)
    FieldLayout = 0x10,
    /// `StandAloneSig` table (0x11)
    StandAloneSig = 0x11,
    /// `EventMap` table (0x12)
    EventMap = 0x12,
    /// `EventPtr` table (0x13)
    EventPtr = 0x13,
    /// `Event` table (0x14)
    Event = 0x14,
    /// `PropertyMap` table (0x15)
    PropertyMap = 0x15,
    /// `PropertyPtr` table (0x16)
    PropertyPtr = 0x16,
    /// `Property` table (0x17)
    Property = 0x17,
    /// `MethodSemantics` table (0x18)
    MethodSemantics = 0x18,
    /// `MethodImpl` table (0x19)
    MethodImpl = 0x19,
    /// `ModuleRef` table (0x1A)
    ModuleRef = 0x1A,
    /// `TypeSpec` table (0x1B)
    TypeSpec = 0x1B,
    /// `ImplMap` table (0x1C)
    ImplMap = 0x1C,
    /// `FieldRVA` table (0x1D)
    FieldRVA = 0x1D,
    /// `EncLog` table (0x1E), the edit log of an EnC delta
    EncLog = 0x1E,
    /// `EncMap` table (0x1F), the token map of an EnC delta
    EncMap = 0x1F,
    /// `Assembly` table (0x20), at most one row
    Assembly = 0x20,
    /// `AssemblyProcessor` table (0x21)
    AssemblyProcessor = 0x21,
    /// `AssemblyOS` table (0x22)
    AssemblyOS = 0x22,
    /// `AssemblyRef` table (0x23)
    AssemblyRef = 0x23,
    /// `AssemblyRefProcessor` table (0x24)
    AssemblyRefProcessor = 0x24,
    /// `AssemblyRefOS` table (0x25)
    AssemblyRefOS = 0x25,
    /// `File` table (0x26)
    File = 0x26,
    /// `ExportedType` table (0x27)
    ExportedType = 0x27,
    /// `ManifestResource` table (0x28)
    ManifestResource = 0x28,
    /// `NestedClass` table (0x29)
    NestedClass = 0x29,
    /// `GenericParam` table (0x2A)
    GenericParam = 0x2A,
    /// `MethodSpec` table (0x2B)
    MethodSpec = 0x2B,
    /// `GenericParamConstraint` table (0x2C)
    GenericParamConstraint = 0x2C,
    /// `Document` table (0x30), portable PDB
    Document = 0x30,
    /// `MethodDebugInformation` table (0x31), portable PDB
    MethodDebugInformation = 0x31,
    /// `LocalScope` table (0x32), portable PDB
    LocalScope = 0x32,
    /// `LocalVariable` table (0x33), portable PDB
    LocalVariable = 0x33,
    /// `LocalConstant` table (0x34), portable PDB
    LocalConstant = 0x34,
    /// `ImportScope` table (0x35), portable PDB
    ImportScope = 0x35,
    /// `StateMachineMethod` table (0x36), portable PDB
    StateMachineMethod = 0x36,
    /// `CustomDebugInformation` table (0x37), portable PDB
    CustomDebugInformation = 0x37,
}

impl TableId {
    /// The name used in dump headers and decoded tokens
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TableId::Module => "Module",
            TableId::TypeRef => "TypeRef",
            TableId::TypeDef => "TypeDef",
            TableId::FieldPtr => "FieldPtr",
            TableId::Field => "Field",
            TableId::MethodPtr => "MethodPtr",
            TableId::MethodDef => "Method",
            TableId::ParamPtr => "ParamPtr",
            TableId::Param => "Param",
            TableId::InterfaceImpl => "InterfaceImpl",
            TableId::MemberRef => "MemberRef",
            TableId::Constant => "Constant",
            TableId::CustomAttribute => "CustomAttribute",
            TableId::FieldMarshal => "FieldMarshal",
            TableId::DeclSecurity => "DeclSecurity",
            TableId::ClassLayout => "ClassLayout",
            TableId::FieldLayout => "FieldLayout",
            TableId::StandAloneSig => "StandAloneSig",
            TableId::EventMap => "EventMap",
            TableId::EventPtr => "EventPtr",
            TableId::Event => "Event",
            TableId::PropertyMap => "PropertyMap",
            TableId::PropertyPtr => "PropertyPtr",
            TableId::Property => "Property",
            TableId::MethodSemantics => "MethodSemantics",
            TableId::MethodImpl => "MethodImpl",
            TableId::ModuleRef => "ModuleRef",
            TableId::TypeSpec => "TypeSpec",
            TableId::ImplMap => "ImplMap",
            TableId::FieldRVA => "FieldRVA",
            TableId::EncLog => "EncLog",
            TableId::EncMap => "EncMap",
            TableId::Assembly => "Assembly",
            TableId::AssemblyProcessor => "AssemblyProcessor",
            TableId::AssemblyOS => "AssemblyOS",
            TableId::AssemblyRef => "AssemblyRef",
            TableId::AssemblyRefProcessor => "AssemblyRefProcessor",
            TableId::AssemblyRefOS => "AssemblyRefOS",
            TableId::File => "File",
            TableId::ExportedType => "ExportedType",
            TableId::ManifestResource => "ManifestResource",
            TableId::NestedClass => "NestedClass",
            TableId::GenericParam => "GenericParam",
            TableId::MethodSpec => "MethodSpec",
            TableId::GenericParamConstraint => "GenericParamConstraint",
            TableId::Document => "Document",
            TableId::MethodDebugInformation => "MethodDebugInformation",
            TableId::LocalScope => "LocalScope",
            TableId::LocalVariable => "LocalVariable",
            TableId::LocalConstant => "LocalConstant",
            TableId::ImportScope => "ImportScope",
            TableId::StateMachineMethod => "StateMachineMethod",
            TableId::CustomDebugInformation => "CustomDebugInformation",
        }
    }

    /// The table's index byte
    #[must_use]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The token for row `rid` of this table
    #[must_use]
    pub fn token(self, rid: u32) -> u32 {
        (u32::from(self.index()) << 24) | (rid & 0x00FF_FFFF)
    }

    /// Look up a table by its index byte
    #[must_use]
    pub fn from_index(index: u8) -> Option<TableId> {
        TableId::iter().find(|table| table.index() == index)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<u8> for TableId {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        TableId::from_index(value).ok_or_else(|| malformed_error!("Unknown table id - {:#04x}", value))
    }
}

impl FromStr for TableId {
    type Err = Error;

    /// Accepts a display name (`Method`), a variant name (`MethodDef`), both case-insensitive,
    /// or a hex index byte (`0x20`)
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            let index = u8::from_str_radix(hex, 16)
                .map_err(|_| Error::Error(format!("Invalid table index - {s}")))?;
            return TableId::try_from(index);
        }

        TableId::iter()
            .find(|table| {
                table.name().eq_ignore_ascii_case(s) || format!("{table:?}").eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| Error::Error(format!("Unknown table - {s}")))
    }
}
