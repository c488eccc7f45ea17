use std::{
    fs,
    io::{self, Write},
    path::Path,
    str::FromStr,
};

use anyhow::{bail, Context};
use dotdump::{metadata::tables::TableId, render::RenderOptions, Error};

use crate::{app::DeltaArgs, app::HexCaseArg, commands::common::load_session};

pub struct DumpOptions<'a> {
    pub hex_case: HexCaseArg,
    pub output: Option<&'a Path>,
}

/// Parse table selectors, keeping their order.
fn parse_tables(selectors: &[String]) -> anyhow::Result<Vec<TableId>> {
    selectors
        .iter()
        .map(|selector| {
            TableId::from_str(selector).with_context(|| format!("invalid table: {selector}"))
        })
        .collect()
}

pub fn run(
    path: &Path,
    delta: &DeltaArgs,
    selectors: &[String],
    opts: &DumpOptions<'_>,
) -> anyhow::Result<()> {
    let tables = parse_tables(selectors)?;
    let session = load_session(path, delta)?.with_options(RenderOptions {
        hex_case: opts.hex_case.into(),
    });

    let mut sink: Box<dyn Write> = match opts.output {
        Some(out) => Box::new(io::BufWriter::new(
            fs::File::create(out).with_context(|| format!("failed to create {}", out.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut failed = 0;
    for dump in session.dump_many(&tables) {
        sink.write_all(&dump.output)?;

        match dump.result {
            Ok(()) => {}
            Err(Error::UnimplementedTable(table)) => {
                failed += 1;
                eprintln!("{table}: not implemented, skipped");
            }
            Err(error) => {
                failed += 1;
                eprintln!("{}: {error}", dump.table);
            }
        }
    }
    sink.flush()?;

    if failed > 0 {
        bail!("{failed} of {} tables failed", tables.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors() {
        let tables = parse_tables(&[
            "TypeDef".to_string(),
            "method".to_string(),
            "MethodDef".to_string(),
            "0x1E".to_string(),
        ])
        .unwrap();
        assert_eq!(
            tables,
            vec![
                TableId::TypeDef,
                TableId::MethodDef,
                TableId::MethodDef,
                TableId::EncLog
            ]
        );

        assert!(parse_tables(&["Bogus".to_string()]).is_err());
        assert!(parse_tables(&["0x2D".to_string()]).is_err());
    }
}
