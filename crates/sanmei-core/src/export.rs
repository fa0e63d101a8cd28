// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::catalog::Poi;
use crate::SanmeiError;
use std::io::Write;

pub const CSV_HEADER: [&str; 7] = ["ID", "山名", "よみ", "標高", "緯度", "経度", "備考"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes search results as CSV. The BOM is for spreadsheet apps that
/// otherwise guess a legacy encoding for Japanese text.
pub fn write_csv<'a, W, I>(mut writer: W, pois: I, with_bom: bool) -> Result<(), SanmeiError>
where
    W: Write,
    I: IntoIterator<Item = &'a Poi>,
{
    if with_bom {
        writer.write_all(UTF8_BOM)?;
    }

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    let mut rows = 0usize;
    for p in pois {
        wtr.write_record([
            p.id.to_string(),
            p.name.clone(),
            p.kana.clone(),
            p.alt.to_string(),
            p.lat.to_string(),
            p.lon.to_string(),
            String::new(),
        ])?;
        rows += 1;
    }
    wtr.flush()?;
    log::debug!("[Export] Wrote {} CSV rows (bom={})", rows, with_bom);
    Ok(())
}

pub fn to_csv_string<'a, I>(pois: I, with_bom: bool) -> Result<String, SanmeiError>
where
    I: IntoIterator<Item = &'a Poi>,
{
    let mut buf = Vec::new();
    write_csv(&mut buf, pois, with_bom)?;
    // Every field came from a String, so the buffer is valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
