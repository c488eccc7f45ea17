use crate::{
    metadata::tables::{
        AssemblyRaw, AssemblyRefRaw, CustomAttributeRaw, EncLogRaw, EncMapRaw, FieldRaw,
        MemberRefRaw, MethodDefRaw, ModuleRaw, ModuleRefRaw, ParamRaw, RawRow, RowRecord,
        StandAloneSigRaw, TableId, TypeDefRaw, TypeRefRaw, TypeSpecRaw,
    },
    Result,
};

/// A row of any table, typed where the table has a record
#[derive(Clone, Debug, PartialEq)]
pub enum TableRow {
    /// `Module`
    Module(ModuleRaw),
    /// `TypeRef`
    TypeRef(TypeRefRaw),
    /// `TypeDef`
    TypeDef(TypeDefRaw),
    /// `Field`
    Field(FieldRaw),
    /// `MethodDef`
    MethodDef(MethodDefRaw),
    /// `Param`
    Param(ParamRaw),
    /// `MemberRef`
    MemberRef(MemberRefRaw),
    /// `CustomAttribute`
    CustomAttribute(CustomAttributeRaw),
    /// `StandAloneSig`
    StandAloneSig(StandAloneSigRaw),
    /// `ModuleRef`
    ModuleRef(ModuleRefRaw),
    /// `TypeSpec`
    TypeSpec(TypeSpecRaw),
    /// `EncLog`
    EncLog(EncLogRaw),
    /// `EncMap`
    EncMap(EncMapRaw),
    /// `Assembly`
    Assembly(AssemblyRaw),
    /// `AssemblyRef`
    AssemblyRef(AssemblyRefRaw),
    /// Any other table, with its column values untouched
    Opaque(RawRow),
}

impl TableRow {
    /// Type `row` according to its table
    ///
    /// # Errors
    /// Returns an error if a column is missing or a coded index has an invalid tag
    pub fn from_raw(row: RawRow) -> Result<TableRow> {
        Ok(match row.table {
            TableId::Module => TableRow::Module(ModuleRaw::from_row(&row)?),
            TableId::TypeRef => TableRow::TypeRef(TypeRefRaw::from_row(&row)?),
            TableId::TypeDef => TableRow::TypeDef(TypeDefRaw::from_row(&row)?),
            TableId::Field => TableRow::Field(FieldRaw::from_row(&row)?),
            TableId::MethodDef => TableRow::MethodDef(MethodDefRaw::from_row(&row)?),
            TableId::Param => TableRow::Param(ParamRaw::from_row(&row)?),
            TableId::MemberRef => TableRow::MemberRef(MemberRefRaw::from_row(&row)?),
            TableId::CustomAttribute => {
                TableRow::CustomAttribute(CustomAttributeRaw::from_row(&row)?)
            }
            TableId::StandAloneSig => TableRow::StandAloneSig(StandAloneSigRaw::from_row(&row)?),
            TableId::ModuleRef => TableRow::ModuleRef(ModuleRefRaw::from_row(&row)?),
            TableId::TypeSpec => TableRow::TypeSpec(TypeSpecRaw::from_row(&row)?),
            TableId::EncLog => TableRow::EncLog(EncLogRaw::from_row(&row)?),
            TableId::EncMap => TableRow::EncMap(EncMapRaw::from_row(&row)?),
            TableId::Assembly => TableRow::Assembly(AssemblyRaw::from_row(&row)?),
            TableId::AssemblyRef => TableRow::AssemblyRef(AssemblyRefRaw::from_row(&row)?),
            _ => TableRow::Opaque(row),
        })
    }

    /// `true` if `table` has a typed record
    #[must_use]
    pub fn is_typed(table: TableId) -> bool {
        matches!(
            table,
            TableId::Module
                | TableId::TypeRef
                | TableId::TypeDef
                | TableId::Field
                | TableId::MethodDef
                | TableId::Param
                | TableId::MemberRef
                | TableId::CustomAttribute
                | TableId::StandAloneSig
                | TableId::ModuleRef
                | TableId::TypeSpec
                | TableId::EncLog
                | TableId::EncMap
                | TableId::Assembly
                | TableId::AssemblyRef
        )
    }

    /// The table this row belongs to
    #[must_use]
    pub fn table(&self) -> TableId {
        match self {
            TableRow::Module(_) => TableId::Module,
            TableRow::TypeRef(_) => TableId::TypeRef,
            TableRow::TypeDef(_) => TableId::TypeDef,
            TableRow::Field(_) => TableId::Field,
            TableRow::MethodDef(_) => TableId::MethodDef,
            TableRow::Param(_) => TableId::Param,
            TableRow::MemberRef(_) => TableId::MemberRef,
            TableRow::CustomAttribute(_) => TableId::CustomAttribute,
            TableRow::StandAloneSig(_) => TableId::StandAloneSig,
            TableRow::ModuleRef(_) => TableId::ModuleRef,
            TableRow::TypeSpec(_) => TableId::TypeSpec,
            TableRow::EncLog(_) => TableId::EncLog,
            TableRow::EncMap(_) => TableId::EncMap,
            TableRow::Assembly(_) => TableId::Assembly,
            TableRow::AssemblyRef(_) => TableId::AssemblyRef,
            TableRow::Opaque(row) => row.table,
        }
    }

    /// The 1-based row id
    #[must_use]
    pub fn rid(&self) -> u32 {
        match self {
            TableRow::Module(row) => row.rid,
            TableRow::TypeRef(row) => row.rid,
            TableRow::TypeDef(row) => row.rid,
            TableRow::Field(row) => row.rid,
            TableRow::MethodDef(row) => row.rid,
            TableRow::Param(row) => row.rid,
            TableRow::MemberRef(row) => row.rid,
            TableRow::CustomAttribute(row) => row.rid,
            TableRow::StandAloneSig(row) => row.rid,
            TableRow::ModuleRef(row) => row.rid,
            TableRow::TypeSpec(row) => row.rid,
            TableRow::EncLog(row) => row.rid,
            TableRow::EncMap(row) => row.rid,
            TableRow::Assembly(row) => row.rid,
            TableRow::AssemblyRef(row) => row.rid,
            TableRow::Opaque(row) => row.rid,
        }
    }
}
