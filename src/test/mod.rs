//! Shared fixtures for the unit tests of this crate.


use crate::{metadata::tables::TableId, test::builders::MetadataBuilder};

/// MVID shared by [`base_module`] and every delta built on it
pub const BASE_MVID: [u8; 16] = [
    0x8E, 0x90, 0x37, 0xD4, 0xE6, 0x65, 0x7C, 0x48, 0x97, 0x35, 0x7B, 0xDF, 0xF6, 0x99, 0xBE,
    0xA5,
];

/// EncId of [`base_module`]
pub const BASE_ENCID: [u8; 16] = [0x0E; 16];

/// A small module: `App.dll` with one type, two methods, one parameter, and an EnC id
///
/// | Table     | Rows                                   |
/// |-----------|----------------------------------------|
/// | Module    | `App.dll`                              |
/// | TypeRef   | `System.Object`                        |
/// | TypeDef   | `<Module>`, `App.Program`              |
/// | MethodDef | `Main`, `Helper`                       |
/// | Param     | `args`                                 |
/// | ModuleRef | `native.dll`                           |
pub fn base_module() -> MetadataBuilder {
    let mut builder = MetadataBuilder::new();

    let name = builder.string("App.dll");
    let mvid = builder.guid(BASE_MVID);
    let encid = builder.guid(BASE_ENCID);
    builder.row(TableId::Module, &[0, name, mvid, encid, 0]);

    let object = builder.string("Object");
    let system = builder.string("System");
    // ResolutionScope: AssemblyRef 1
    builder.row(TableId::TypeRef, &[(1 << 2) | 2, object, system]);

    let module_type = builder.string("<Module>");
    builder.row(TableId::TypeDef, &[0, module_type, 0, 0, 1, 1]);
    let program = builder.string("Program");
    let app = builder.string("App");
    // Extends: TypeRef 1
    builder.row(TableId::TypeDef, &[0x0010_0001, program, app, (1 << 2) | 1, 1, 1]);

    let signature = builder.blob(&[0x00, 0x01, 0x01, 0x1D, 0x0E]);
    let main = builder.string("Main");
    builder.row(TableId::MethodDef, &[0x2050, 0, 0x0096, main, signature, 1]);
    let void_sig = builder.blob(&[0x00, 0x00, 0x01]);
    let helper = builder.string("Helper");
    builder.row(TableId::MethodDef, &[0x2058, 0, 0x0091, helper, void_sig, 2]);

    let args = builder.string("args");
    builder.row(TableId::Param, &[0, 1, args]);

    let native = builder.string("native.dll");
    builder.row(TableId::ModuleRef, &[native]);

    builder
}

/// A delta on top of `base` with a Module row carrying [`BASE_MVID`] and `enc_base_id`
///
/// The delta's own EncId is a fresh GUID, its index is the second GUID of the delta.
pub fn delta_module(base: &MetadataBuilder, generation: u32, enc_base_id: u32) -> MetadataBuilder {
    let mut delta = MetadataBuilder::delta_of(base);

    let name = delta.string("App.dll");
    let mvid = delta.guid(BASE_MVID);
    let encid = delta.guid([0x1E; 16]);
    delta.row(TableId::Module, &[generation, name, mvid, encid, enc_base_id]);

    delta
}
