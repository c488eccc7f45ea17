//! Edit and Continue delta application.
//!
//! An EnC delta is a small metadata image of its own. Its `EncMap` table lists, sorted by token,
//! the base rows each of its rows stands for; its `EncLog` table records the edit operations.
//! Heap indexes in a delta continue the index space of the heaps it is applied on.
//!
//! [`merge`] produces a new [`RowStore`] in which:
//! - the delta's `Module` row replaces the base `Module` row,
//! - `EncLog` and `EncMap` are the delta's own tables,
//! - rows of every other table replace or append the rows their `EncMap` tokens name,
//! - the delta heaps are chained after the base heaps.
//!
//! Either the whole delta applies or [`merge`] fails with [`crate::Error::InconsistentDelta`];
//! the base store is never modified.

use std::collections::BTreeMap;

use log::debug;

use crate::{
    metadata::{
        image::MetadataImage,
        method::MethodBody,
        store::{MetadataStore, RowStore},
        tables::{RawRow, TableId},
        token::Token,
    },
    Result,
};

/// Column of `Module.Mvid`
const MODULE_MVID: usize = 2;
/// Column of `Module.EncId`
const MODULE_ENCID: usize = 3;
/// Column of `Module.EncBaseId`
const MODULE_ENCBASEID: usize = 4;
/// Column of `MethodDef.RVA`
const METHOD_RVA: usize = 0;

/// Apply one EnC delta on top of `base`
///
/// # Arguments
/// * `base`           - The store the delta was compiled against
/// * `delta_metadata` - The delta metadata image (`.dmeta`), starting at `BSJB`; empty for no delta
/// * `delta_il`       - The delta IL stream (`.dil`) that delta `MethodDef` RVAs point into
///
/// # Errors
/// Returns [`crate::Error::InconsistentDelta`] if the delta does not line up with `base`, or a
/// parsing error if the delta image is malformed
pub fn merge(base: &RowStore, delta_metadata: &[u8], delta_il: &[u8]) -> Result<RowStore> {
    if delta_metadata.is_empty() {
        return Ok(base.clone());
    }

    let delta = MetadataImage::parse(delta_metadata)?;
    let mut merged = base.clone();

    if let Some(strings) = delta.strings {
        merged.strings.push(strings)?;
    }
    if let Some(blob) = delta.blob {
        merged.blobs.push(blob)?;
    }
    if let Some(guid) = delta.guid {
        merged.guids.push(guid)?;
    }

    apply_module(base, &mut merged, &delta)?;

    let mut enc_map = enc_map_tokens(&delta)?;
    let mut updated = 0;
    let mut added = 0;

    merged.delta_methods.clear();
    for (table, _) in delta.tables.present() {
        if matches!(table, TableId::Module | TableId::EncLog | TableId::EncMap) {
            continue;
        }

        let rows = delta.rows(table)?;
        let targets = enc_map.remove(&table).unwrap_or_default();
        if targets.len() != rows.len() {
            return Err(delta_error!(
                "{} has {} delta rows but {} EncMap tokens",
                table,
                rows.len(),
                targets.len()
            ));
        }

        for (row, target) in rows.iter().zip(targets) {
            if table == TableId::MethodDef {
                check_method_body(row, delta_il)?;
                merged.delta_methods.insert(target);
            }

            let existing = &mut merged.tables[table.index() as usize];
            let count = existing.len();
            match target as usize {
                rid if rid >= 1 && rid <= count => {
                    existing[rid - 1] = row.with_rid(target);
                    updated += 1;
                }
                rid if rid == count + 1 => {
                    existing.push(row.with_rid(target));
                    added += 1;
                }
                _ => {
                    return Err(delta_error!(
                        "EncMap token {} names a row absent from {} with {} rows",
                        Token::new(table.token(target)),
                        table,
                        count
                    ))
                }
            }
        }
    }

    if let Some((table, targets)) = enc_map.into_iter().next() {
        return Err(delta_error!(
            "EncMap lists {} tokens for {} which has no delta rows",
            targets.len(),
            table
        ));
    }

    merged.tables[TableId::EncLog.index() as usize] = delta.rows(TableId::EncLog)?;
    merged.tables[TableId::EncMap.index() as usize] = delta.rows(TableId::EncMap)?;
    check_enc_log(&merged)?;

    merged.delta_il = Some(delta_il.to_vec());
    merged.generation += 1;

    debug!(
        "applied delta generation {}: {} rows updated, {} rows added, {} edits, {} bytes of IL",
        merged.generation,
        updated,
        added,
        merged.row_count(TableId::EncLog),
        delta_il.len()
    );

    Ok(merged)
}

fn apply_module(base: &RowStore, merged: &mut RowStore, delta: &MetadataImage) -> Result<()> {
    let Some(module) = delta.rows(TableId::Module)?.into_iter().next() else {
        return Err(delta_error!("Delta has no Module row"));
    };

    if let Ok(base_module) = base.raw(TableId::Module, 1) {
        let base_mvid = base.guids.guid(base_module.value(MODULE_MVID)?)?;
        let mvid_index = module.value(MODULE_MVID)?;
        let delta_mvid = merged
            .guids
            .guid(mvid_index)
            .map_err(|_| delta_error!("Delta Mvid {:#x} does not resolve", mvid_index))?;
        if base_mvid != delta_mvid {
            return Err(delta_error!(
                "Delta Mvid {} does not match base Mvid {}",
                delta_mvid,
                base_mvid
            ));
        }

        let base_encid = base_module.value(MODULE_ENCID)?;
        if base_encid != 0 {
            let expected = base.guids.guid(base_encid)?;
            let delta_base = match module.value(MODULE_ENCBASEID)? {
                0 => None,
                index => merged.guids.guid(index).ok(),
            };
            if delta_base != Some(expected) {
                return Err(delta_error!(
                    "Delta EncBaseId does not match base EncId {}",
                    expected
                ));
            }
        }
    }

    merged.tables[TableId::Module.index() as usize] = vec![module.with_rid(1)];
    Ok(())
}

/// The row ids the delta's `EncMap` assigns, grouped by table in map order
fn enc_map_tokens(delta: &MetadataImage) -> Result<BTreeMap<TableId, Vec<u32>>> {
    let mut targets: BTreeMap<TableId, Vec<u32>> = BTreeMap::new();
    for row in delta.rows(TableId::EncMap)? {
        let token = Token::new(row.value(0)?);
        let Some(table) = token.table_id() else {
            return Err(delta_error!(
                "EncMap row {} names unknown table - {}",
                row.rid,
                token
            ));
        };

        if matches!(table, TableId::Module | TableId::EncLog | TableId::EncMap) {
            continue;
        }

        targets.entry(table).or_default().push(token.row());
    }

    Ok(targets)
}

fn check_method_body(row: &RawRow, delta_il: &[u8]) -> Result<()> {
    let rva = row.value(METHOD_RVA)?;
    if rva == 0 {
        return Ok(());
    }

    let Some(body) = delta_il.get(rva as usize..) else {
        return Err(delta_error!(
            "Method RVA {:#010x} lies outside the {} bytes of delta IL",
            rva,
            delta_il.len()
        ));
    };

    MethodBody::from(body).map_err(|error| {
        delta_error!("Method body at RVA {:#010x} is invalid - {}", rva, error)
    })?;
    Ok(())
}

fn check_enc_log(merged: &RowStore) -> Result<()> {
    for row in merged.rows(TableId::EncLog) {
        let token = Token::new(row.value(0)?);
        let Some(table) = token.table_id() else {
            return Err(delta_error!(
                "EncLog row {} names unknown table - {}",
                row.rid,
                token
            ));
        };

        let rid = token.row();
        if rid == 0 || rid > merged.row_count(table) {
            return Err(delta_error!(
                "EncLog row {} names {} which is absent from the merged module",
                row.rid,
                token.decode()
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::tables::{FuncCode, TableRow},
        test::{base_module, builders::MetadataBuilder, delta_module},
        Error, HeapKind,
    };

    /// Tiny method body: `nop; ret`
    const TINY_BODY: [u8; 3] = [0x0A, 0x00, 0x2A];

    fn delta_il() -> Vec<u8> {
        let mut il = vec![0x07, 0x00, 0x00, 0x00];
        il.extend_from_slice(&TINY_BODY);
        il
    }

    fn base_store(base: &MetadataBuilder) -> RowStore {
        RowStore::from_image(&base.build()).unwrap()
    }

    /// Replaces `Main`, adds `Added` to `App.Program`
    fn method_delta(base: &MetadataBuilder) -> MetadataBuilder {
        let mut delta = delta_module(base, 1, 2);

        let main = delta.string("Main");
        let signature = delta.blob(&[0x00, 0x00, 0x01]);
        delta.row(TableId::MethodDef, &[4, 0, 0x0096, main, signature, 0]);
        let added = delta.string("Added");
        delta.row(TableId::MethodDef, &[0, 0, 0x0091, added, signature, 0]);

        delta.row(TableId::EncLog, &[TableId::MethodDef.token(1), 0]);
        delta.row(TableId::EncLog, &[TableId::TypeDef.token(2), 1]);
        delta.row(TableId::EncLog, &[TableId::MethodDef.token(3), 0]);

        delta.row(TableId::EncMap, &[TableId::Module.token(1)]);
        delta.row(TableId::EncMap, &[TableId::MethodDef.token(1)]);
        delta.row(TableId::EncMap, &[TableId::MethodDef.token(3)]);
        delta.minimal_delta();
        delta
    }

    #[test]
    fn empty_delta() {
        let base = base_module();
        let store = base_store(&base);

        let merged = merge(&store, &[], &[]).unwrap();
        assert_eq!(merged.tables(), store.tables());
        for (table, count) in store.tables() {
            for rid in 1..=count {
                assert_eq!(merged.row(table, rid).unwrap(), store.row(table, rid).unwrap());
            }
        }
        assert_eq!(merged.generation(), 0);
        assert!(merged.delta_il().is_none());
    }

    #[test]
    fn replace_and_append() {
        let base = base_module();
        let store = base_store(&base);
        let delta = method_delta(&base);

        let merged = merge(&store, &delta.build(), &delta_il()).unwrap();
        assert_eq!(merged.generation(), 1);
        assert_eq!(merged.row_count(TableId::MethodDef), 3);
        assert_eq!(merged.row_count(TableId::TypeDef), 2);
        assert_eq!(merged.row_count(TableId::EncLog), 3);
        assert_eq!(merged.row_count(TableId::EncMap), 3);
        assert_eq!(store.row_count(TableId::MethodDef), 2);

        match merged.row(TableId::MethodDef, 1).unwrap() {
            TableRow::MethodDef(method) => {
                assert_eq!(method.rid, 1);
                assert_eq!(method.token.value(), 0x0600_0001);
                assert_eq!(method.rva, 4);
                assert_eq!(merged.string(method.name).unwrap(), "Main");
                assert_eq!(merged.blob(method.signature).unwrap(), &[0x00, 0x00, 0x01]);
            }
            other => panic!("unexpected row {other:?}"),
        }

        match merged.row(TableId::MethodDef, 2).unwrap() {
            TableRow::MethodDef(method) => {
                assert_eq!(merged.string(method.name).unwrap(), "Helper");
            }
            other => panic!("unexpected row {other:?}"),
        }

        match merged.row(TableId::MethodDef, 3).unwrap() {
            TableRow::MethodDef(method) => {
                assert_eq!(method.rid, 3);
                assert_eq!(merged.string(method.name).unwrap(), "Added");
            }
            other => panic!("unexpected row {other:?}"),
        }

        match merged.row(TableId::EncLog, 2).unwrap() {
            TableRow::EncLog(log) => {
                assert_eq!(log.token_value.value(), 0x0200_0002);
                assert_eq!(log.func_code, FuncCode::AddMethod);
            }
            other => panic!("unexpected row {other:?}"),
        }

        match merged.row(TableId::Module, 1).unwrap() {
            TableRow::Module(module) => {
                assert_eq!(module.generation, 1);
                assert_eq!(module.encbaseid, 2);
            }
            other => panic!("unexpected row {other:?}"),
        }

        // base heaps stay reachable through the chain
        assert_eq!(merged.string(1).unwrap(), "App.dll");

        let (body, code) = merged.method_body(1).unwrap().unwrap();
        assert!(!body.is_fat);
        assert_eq!(code, &[0x00, 0x2A]);
        assert!(merged.method_body(2).unwrap().is_none());
        assert!(merged.method_body(3).unwrap().is_none());
    }

    #[test]
    fn chained_generations() {
        let base = base_module();
        let store = base_store(&base);
        let first = method_delta(&base);
        let merged = merge(&store, &first.build(), &delta_il()).unwrap();

        // EncBaseId: the EncId of the first generation
        let mut second = delta_module(&first, 2, 4);
        let renamed = second.string("Renamed");
        second.row(TableId::ModuleRef, &[renamed]);
        second.row(TableId::EncLog, &[TableId::ModuleRef.token(1), 0]);
        second.row(TableId::EncMap, &[TableId::ModuleRef.token(1)]);

        let merged = merge(&merged, &second.build(), &[]).unwrap();
        assert_eq!(merged.generation(), 2);
        assert_eq!(merged.row_count(TableId::MethodDef), 3);
        assert_eq!(merged.row_count(TableId::EncLog), 1);
        match merged.row(TableId::ModuleRef, 1).unwrap() {
            TableRow::ModuleRef(module_ref) => {
                assert_eq!(merged.string(module_ref.name).unwrap(), "Renamed");
            }
            other => panic!("unexpected row {other:?}"),
        }
    }

    fn assert_inconsistent(store: &RowStore, delta: &MetadataBuilder, il: &[u8]) {
        match merge(store, &delta.build(), il) {
            Err(Error::InconsistentDelta(_)) => {}
            Err(other) => panic!("expected an inconsistent delta, got {other}"),
            Ok(_) => panic!("expected an inconsistent delta"),
        }
    }

    #[test]
    fn missing_enc_map() {
        let base = base_module();
        let store = base_store(&base);

        let mut delta = delta_module(&base, 1, 2);
        let name = delta.string("extra.dll");
        delta.row(TableId::ModuleRef, &[name]);
        assert_inconsistent(&store, &delta, &[]);
    }

    #[test]
    fn surplus_enc_map() {
        let base = base_module();
        let store = base_store(&base);

        let mut delta = delta_module(&base, 1, 2);
        delta.row(TableId::EncMap, &[TableId::Field.token(1)]);
        assert_inconsistent(&store, &delta, &[]);
    }

    #[test]
    fn gap_in_rows() {
        let base = base_module();
        let store = base_store(&base);

        let mut delta = delta_module(&base, 1, 2);
        let name = delta.string("gap.dll");
        delta.row(TableId::ModuleRef, &[name]);
        delta.row(TableId::EncMap, &[TableId::ModuleRef.token(3)]);
        assert_inconsistent(&store, &delta, &[]);
    }

    #[test]
    fn unknown_enc_log_rows() {
        let base = base_module();
        let store = base_store(&base);

        let mut delta = delta_module(&base, 1, 2);
        delta.row(TableId::EncLog, &[TableId::Field.token(7), 0]);
        assert_inconsistent(&store, &delta, &[]);

        let mut delta = delta_module(&base, 1, 2);
        delta.row(TableId::EncLog, &[0x2D00_0001, 0]);
        assert_inconsistent(&store, &delta, &[]);
    }

    #[test]
    fn mvid_mismatch() {
        let base = base_module();
        let store = base_store(&base);

        let mut delta = MetadataBuilder::delta_of(&base);
        let name = delta.string("App.dll");
        let mvid = delta.guid([0x55; 16]);
        delta.row(TableId::Module, &[1, name, mvid, 0, 2]);
        assert_inconsistent(&store, &delta, &[]);
    }

    #[test]
    fn enc_base_id_mismatch() {
        let base = base_module();
        let store = base_store(&base);

        let mut delta = MetadataBuilder::delta_of(&base);
        let name = delta.string("App.dll");
        // Mvid of the base, EncBaseId pointing at the Mvid instead of the EncId
        delta.row(TableId::Module, &[1, name, 1, 0, 1]);
        assert_inconsistent(&store, &delta, &[]);

        let mut delta = MetadataBuilder::delta_of(&base);
        delta.row(TableId::Module, &[1, name, 1, 0, 0]);
        assert_inconsistent(&store, &delta, &[]);
    }

    #[test]
    fn bad_method_bodies() {
        let base = base_module();
        let store = base_store(&base);
        let delta = method_delta(&base);

        // RVA 4 past the end
        assert_inconsistent(&store, &delta, &[0x00; 4]);
        // fat header announcing more code than present
        assert_inconsistent(&store, &delta, &[0x00, 0x00, 0x00, 0x00, 0x03, 0x30]);
    }

    #[test]
    fn heaps_without_delta_segments() {
        let base = base_module();
        let store = base_store(&base);

        let mut delta = MetadataBuilder::delta_of(&base);
        delta.row(TableId::Module, &[1, 0, 1, 0, 2]);
        let merged = merge(&store, &delta.build(), &[]).unwrap();
        assert!(matches!(
            merged.string(0x4000),
            Err(Error::HeapIndex {
                heap: HeapKind::Strings,
                ..
            })
        ));
    }
}
