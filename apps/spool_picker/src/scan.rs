//! Spool ids arrive either typed in or as the URL printed on a spool's
//! QR/NFC tag, e.g. `http://spool-scanner/select/SPOOL_ID`.

use anyhow::{bail, Context};
use percent_encoding::percent_decode_str;
use shared::domain::SpoolId;
use url::Url;

const SELECT_SEGMENT: &str = "select";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedSpool {
    pub spool_id: SpoolId,
    /// Origin of the tag URL, usable as the server when none is configured.
    pub origin: Option<Url>,
}

pub fn parse_scan(input: &str) -> anyhow::Result<ScannedSpool> {
    let input = input.trim();
    if input.is_empty() {
        bail!("Spool ID required");
    }

    let Ok(url) = Url::parse(input) else {
        return Ok(ScannedSpool {
            spool_id: SpoolId::new(input),
            origin: None,
        });
    };
    if !matches!(url.scheme(), "http" | "https") {
        bail!("unsupported tag url '{input}'");
    }

    let mut segments = url.path_segments().into_iter().flatten();
    let spool_id = match (segments.next(), segments.next()) {
        (Some(SELECT_SEGMENT), Some(id)) if !id.is_empty() => percent_decode_str(id)
            .decode_utf8()
            .with_context(|| format!("spool id in '{input}' is not valid UTF-8"))?
            .into_owned(),
        (Some(SELECT_SEGMENT), _) => bail!("Spool ID required"),
        _ => bail!("Invalid URL: expected /{SELECT_SEGMENT}/<spool id>, got '{input}'"),
    };

    let mut origin = url.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);

    Ok(ScannedSpool {
        spool_id: SpoolId::new(spool_id),
        origin: Some(origin),
    })
}

#[cfg(test)]
#[path = "tests/scan_tests.rs"]
mod tests;
