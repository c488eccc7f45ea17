use std::path::Path;

use anyhow::Context;
use dotdump::Session;

use crate::app::DeltaArgs;

/// Open `path`, applying the delta when both delta files are given.
pub fn load_session(path: &Path, delta: &DeltaArgs) -> anyhow::Result<Session> {
    match (&delta.delta_meta, &delta.delta_il) {
        (Some(meta), Some(il)) => Session::open_with_delta(path, meta, il).with_context(|| {
            format!(
                "failed to apply delta {} / {} to {}",
                meta.display(),
                il.display(),
                path.display()
            )
        }),
        _ => Session::open(path)
            .with_context(|| format!("failed to load module: {}", path.display())),
    }
}
