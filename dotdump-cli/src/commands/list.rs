use std::path::Path;

use serde::Serialize;

use crate::{
    app::{DeltaArgs, GlobalOptions},
    commands::common::load_session,
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct TableEntry {
    table: String,
    index: String,
    rows: u32,
    rendered: bool,
}

#[derive(Debug, Serialize)]
struct ListOutput {
    generation: u32,
    tables: Vec<TableEntry>,
}

pub fn run(path: &Path, delta: &DeltaArgs, opts: &GlobalOptions) -> anyhow::Result<()> {
    let session = load_session(path, delta)?;

    let output = ListOutput {
        generation: session.store().generation(),
        tables: session
            .tables()
            .into_iter()
            .map(|(table, rows)| TableEntry {
                table: table.name().to_string(),
                index: format!("0x{:02X}", table.index()),
                rows,
                rendered: dotdump::render::TableRenderer::supports(table),
            })
            .collect(),
    };

    print_output(&output, opts, |output| {
        if output.generation > 0 {
            println!("EnC generation {}", output.generation);
            println!();
        }

        let mut tw = TabWriter::new(&[
            ("Table", Align::Left),
            ("Index", Align::Right),
            ("Rows", Align::Right),
            ("", Align::Left),
        ]);
        for entry in &output.tables {
            tw.row(vec![
                entry.table.clone(),
                entry.index.clone(),
                entry.rows.to_string(),
                if entry.rendered {
                    String::new()
                } else {
                    "(no renderer)".to_string()
                },
            ]);
        }
        tw.print();
    })
}
