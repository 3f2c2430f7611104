//! File and stdin helpers shared by the commands.
//!
//! Round logs may be stored plain or Zstandard-compressed; `read_text_auto`
//! picks the decoder from the `.zst` extension.

use std::io::BufRead;
use std::path::Path;

/// Reads one trimmed line. `None` on EOF or read error, which the
/// interactive table treats as quit.
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Reads a text file, decompressing `.zst` files and dropping a leading
/// UTF-8 BOM.
///
/// ```rust,no_run
/// # use drawpoker_cli::io_utils::read_text_auto;
/// let plain = read_text_auto("rounds.jsonl").unwrap();
/// let packed = read_text_auto("rounds.jsonl.zst").unwrap();
/// ```
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::stream::decode_all(comp.as_slice()).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    if s.starts_with('\u{feff}') {
        s.drain(..'\u{feff}'.len_utf8());
    }
}
