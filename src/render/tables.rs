use std::{fmt::Display, io::Write};

use crate::{
    metadata::{
        heaps::HeapResolver,
        identity::Identity,
        store::MetadataStore,
        tables::{
            AssemblyHashAlgorithm, AssemblyRaw, AssemblyRefRaw, CodedIndex, EncLogRaw, TableId,
            TableRow,
        },
        token::decode,
    },
    render::{hexdump, HexCase},
    Error, Result,
};

/// Writes the field lines of one row
pub(super) struct RowWriter<'a, S: MetadataStore + ?Sized, W: Write + ?Sized> {
    pub sink: &'a mut W,
    pub heaps: HeapResolver<'a, S>,
    pub hex_case: HexCase,
}

impl<'a, S: MetadataStore + ?Sized, W: Write + ?Sized> RowWriter<'a, S, W> {
    pub fn field(&mut self, label: &str, value: impl Display) -> Result<()> {
        writeln!(self.sink, "{:<14} {}", format!("{label}:"), value)?;
        Ok(())
    }

    fn flags32(&mut self, label: &str, value: u32) -> Result<()> {
        self.field(label, format_args!("0x{value:08x}"))
    }

    fn flags16(&mut self, label: &str, value: u16) -> Result<()> {
        self.field(label, format_args!("0x{value:04x}"))
    }

    fn token(&mut self, label: &str, token: u32) -> Result<()> {
        self.field(label, format_args!("0x{:08x} ({})", token, decode(token)))
    }

    fn coded(&mut self, label: &str, index: &CodedIndex) -> Result<()> {
        self.token(label, index.token.value())
    }

    fn row_index(&mut self, label: &str, table: TableId, rid: u32) -> Result<()> {
        self.token(label, table.token(rid))
    }

    fn string(&mut self, label: &str, index: u32) -> Result<()> {
        let value = self.heaps.resolve_string(index)?;
        self.field(label, value)
    }

    fn guid(&mut self, label: &str, index: u32) -> Result<()> {
        let value = self.heaps.resolve_guid(index)?;
        self.field(label, value)
    }

    fn version(&mut self, major: u16, minor: u16, build: u16, revision: u16) -> Result<()> {
        self.field("Version", format_args!("{major}.{minor}.{build}.{revision}"))
    }

    /// `BlobPtr` line, then the zero size marker naming `what` or the hex dump
    fn blob(&mut self, label: &str, index: u32, what: &str) -> Result<&'a [u8]> {
        let data = self.heaps.resolve_blob(index)?;
        self.field(label, format_args!("BlobPtr (0x{index:08x})"))?;

        if data.is_empty() {
            writeln!(self.sink, "\tZero sized {what}")?;
        } else {
            write!(self.sink, "\tDump:")?;
            hexdump(&mut *self.sink, data, self.hex_case)?;
            writeln!(self.sink)?;
        }

        Ok(data)
    }

    fn end(&mut self) -> Result<()> {
        writeln!(self.sink)?;
        Ok(())
    }

    /// The field lines of `row` and the closing blank line
    pub fn row(&mut self, row: &TableRow) -> Result<()> {
        match row {
            TableRow::Module(module) => {
                self.field("Generation", module.generation)?;
                self.string("Name", module.name)?;
                self.guid("Mvid", module.mvid)?;
                self.guid("EncId", module.encid)?;
                self.guid("EncBaseId", module.encbaseid)?;
            }
            TableRow::TypeRef(typeref) => {
                self.coded("Scope", &typeref.resolution_scope)?;
                self.string("Name", typeref.type_name)?;
                self.string("Namespace", typeref.type_namespace)?;
            }
            TableRow::TypeDef(typedef) => {
                self.flags32("Flags", typedef.flags)?;
                self.string("Name", typedef.type_name)?;
                self.string("Namespace", typedef.type_namespace)?;
                self.coded("Extends", &typedef.extends)?;
                self.row_index("FieldList", TableId::Field, typedef.field_list)?;
                self.row_index("MethodList", TableId::MethodDef, typedef.method_list)?;
            }
            TableRow::Field(field) => {
                self.flags16("Flags", field.flags)?;
                self.string("Name", field.name)?;
                self.blob("Signature", field.signature, "signature")?;
            }
            TableRow::MethodDef(method) => {
                self.flags32("RVA", method.rva)?;
                self.flags16("ImplFlags", method.impl_flags)?;
                self.flags16("Flags", method.flags)?;
                self.string("Name", method.name)?;
                self.blob("Signature", method.signature, "signature")?;
                self.row_index("ParamList", TableId::Param, method.param_list)?;
            }
            TableRow::Param(param) => {
                self.flags16("Flags", param.flags)?;
                self.field("Sequence", param.sequence)?;
                self.string("Name", param.name)?;
            }
            TableRow::MemberRef(member) => {
                self.coded("Class", &member.class)?;
                self.string("Name", member.name)?;
                self.blob("Signature", member.signature, "signature")?;
            }
            TableRow::CustomAttribute(attribute) => {
                self.coded("Parent", &attribute.parent)?;
                self.coded("Type", &attribute.constructor)?;
                self.blob("Value", attribute.value, "value")?;
            }
            TableRow::StandAloneSig(sig) => {
                self.blob("Signature", sig.signature, "signature")?;
            }
            TableRow::ModuleRef(module_ref) => {
                self.string("Name", module_ref.name)?;
            }
            TableRow::TypeSpec(spec) => {
                self.blob("Signature", spec.signature, "signature")?;
            }
            TableRow::EncLog(log) => self.enc_log(log)?,
            TableRow::EncMap(map) => {
                self.token("Token", map.original_token.value())?;
            }
            TableRow::Assembly(assembly) => self.assembly(assembly)?,
            TableRow::AssemblyRef(assembly_ref) => self.assembly_ref(assembly_ref)?,
            TableRow::Opaque(raw) => return Err(Error::UnimplementedTable(raw.table)),
        }

        self.end()
    }

    fn enc_log(&mut self, log: &EncLogRaw) -> Result<()> {
        self.token("Token", log.token_value.value())?;
        self.field("FuncCode", log.func_code)
    }

    fn assembly(&mut self, assembly: &AssemblyRaw) -> Result<()> {
        self.string("Name", assembly.name)?;
        self.flags32("Hash Algoritm", assembly.hash_alg_id)?;
        self.version(
            assembly.major_version,
            assembly.minor_version,
            assembly.build_number,
            assembly.revision_number,
        )?;
        self.flags32("Flags", assembly.flags)?;
        self.blob("PublicKey", assembly.public_key, "public key")?;
        self.string("Culture", assembly.culture)
    }

    fn assembly_ref(&mut self, assembly_ref: &AssemblyRefRaw) -> Result<()> {
        self.version(
            assembly_ref.major_version,
            assembly_ref.minor_version,
            assembly_ref.build_number,
            assembly_ref.revision_number,
        )?;
        self.flags32("Flags", assembly_ref.flags)?;

        let key = self.blob(
            "Key/Token",
            assembly_ref.public_key_or_token,
            "public key or token",
        )?;
        if assembly_ref.has_public_key() && !key.is_empty() {
            let token =
                Identity::PubKey(key.to_vec()).to_token(AssemblyHashAlgorithm::SHA1)?;
            self.field("Public Key Token", format_args!("{token:016x}"))?;
        }

        self.string("Name", assembly_ref.name)?;
        self.string("Culture", assembly_ref.culture)?;
        self.blob("Hash Value", assembly_ref.hash_value, "hash value")?;
        Ok(())
    }
}
