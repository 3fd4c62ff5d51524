//! Program Image Loader.
//!
//! This module turns a hex file into words ready to place in SRAM. It performs:
//! 1. **Parsing:** Verilog hex (`@<addr>` markers followed by hex bytes) or one
//!    hex word per line. `//` starts a comment in either format.
//! 2. **Merging:** Verilog sections are merged into one flat byte map; later
//!    bytes overwrite earlier ones at the same address.
//! 3. **Packing:** Bytes are packed little-endian into words covering every
//!    word that holds at least one image byte. Missing bytes read as zero. An
//!    image reaching past the memory depth is rejected before packing.
//! 4. **Halt Rewrite:** `addi a0, x0, 255` is replaced with the reserved halt word.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::common::constants::{BYTE_OFFSET_MASK, WORD_BYTES, WORD_SHIFT};
use crate::common::error::ImageError;
use crate::config::{ImageConfig, ImageFormat};
use crate::isa::system;

/// Words to place in memory, starting at a word-aligned byte address.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgramImage {
    /// Byte address of the first word.
    pub base: u32,
    /// Image contents.
    pub words: Vec<u32>,
}

impl ProgramImage {
    /// Word index of the first word.
    pub const fn base_word(&self) -> usize {
        (self.base >> WORD_SHIFT) as usize
    }

    /// One past the last word index the image occupies.
    pub fn end_word(&self) -> usize {
        self.base_word() + self.words.len()
    }

    /// Word at byte address `addr`, if the image covers it.
    pub fn word_at(&self, addr: u32) -> Option<u32> {
        let idx = ((addr >> WORD_SHIFT) as usize).checked_sub(self.base_word())?;
        self.words.get(idx).copied()
    }
}

/// Strips a trailing `//` comment and surrounding whitespace.
fn strip_comment(line: &str) -> &str {
    line.split("//").next().unwrap_or_default().trim()
}

/// Returns the format a text looks like: Verilog if any line starts with `@`.
pub fn detect_format(text: &str) -> ImageFormat {
    if text.lines().any(|l| strip_comment(l).starts_with('@')) {
        ImageFormat::Verilog
    } else {
        ImageFormat::Words
    }
}

/// Parses Verilog hex into a flat byte map.
///
/// Bytes before the first `@` marker start at address 0.
///
/// # Arguments
///
/// * `text` - File contents.
///
/// # Returns
///
/// Address to byte, or a parse error naming the offending line.
pub fn parse_verilog_hex(text: &str) -> Result<BTreeMap<u32, u8>, ImageError> {
    let mut bytes = BTreeMap::new();
    let mut addr: Option<u32> = Some(0);

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }

        if let Some(hex) = line.strip_prefix('@') {
            let value = u32::from_str_radix(hex.trim(), 16).map_err(|e| ImageError::Parse {
                line: line_no,
                msg: format!("bad address `{hex}`: {e}"),
            })?;
            addr = Some(value);
            continue;
        }

        for token in line.split_whitespace() {
            if token.len() > 2 {
                return Err(ImageError::Parse {
                    line: line_no,
                    msg: format!("`{token}` is not a single byte"),
                });
            }
            let byte = u8::from_str_radix(token, 16).map_err(|e| ImageError::Parse {
                line: line_no,
                msg: format!("bad byte `{token}`: {e}"),
            })?;
            let Some(at) = addr else {
                return Err(ImageError::Parse {
                    line: line_no,
                    msg: "data runs past the end of the 32-bit address space".to_string(),
                });
            };
            let _ = bytes.insert(at, byte);
            addr = at.checked_add(1);
        }
    }
    Ok(bytes)
}

/// Packs a byte map into little-endian words.
///
/// The image starts at the word holding the lowest byte and ends with the word
/// holding the highest byte.
///
/// # Arguments
///
/// * `bytes` - Merged byte map.
/// * `capacity_words` - Memory depth in words. An image ending past it is
///   rejected before any word is allocated.
pub fn pack_words(bytes: &BTreeMap<u32, u8>, capacity_words: usize) -> Result<ProgramImage, ImageError> {
    let (Some((&min, _)), Some((&max, _))) = (bytes.first_key_value(), bytes.last_key_value())
    else {
        return Ok(ProgramImage::default());
    };

    let base = min & !BYTE_OFFSET_MASK;
    let last = max & !BYTE_OFFSET_MASK;
    let end_word = (last >> WORD_SHIFT) as usize + 1;
    if end_word > capacity_words {
        return Err(ImageError::TooLarge {
            end_word,
            capacity: capacity_words,
        });
    }
    let count = ((last - base) >> WORD_SHIFT) as usize + 1;
    let mut words = Vec::with_capacity(count);
    for w in 0..count {
        let addr = base + (w as u32) * WORD_BYTES;
        let word = (0..WORD_BYTES).fold(0u32, |acc, b| {
            let byte = addr.checked_add(b).and_then(|a| bytes.get(&a)).copied().unwrap_or(0);
            acc | (u32::from(byte) << (b * 8))
        });
        words.push(word);
    }
    Ok(ProgramImage { base, words })
}

/// Parses one hex word per line, placed from address 0.
///
/// An optional `0x` prefix is accepted.
pub fn parse_word_hex(text: &str) -> Result<ProgramImage, ImageError> {
    let mut words = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }
        let hex = line
            .strip_prefix("0x")
            .or_else(|| line.strip_prefix("0X"))
            .unwrap_or(line);
        let word = u32::from_str_radix(hex, 16).map_err(|e| ImageError::Parse {
            line: i + 1,
            msg: format!("bad word `{line}`: {e}"),
        })?;
        words.push(word);
    }
    Ok(ProgramImage { base: 0, words })
}

/// Replaces every halt idiom with the reserved halt word.
///
/// # Returns
///
/// Number of words rewritten.
pub fn rewrite_halt(image: &mut ProgramImage) -> usize {
    let mut count = 0;
    for word in image.words.iter_mut().filter(|w| **w == system::HALT_IDIOM) {
        *word = system::HALT;
        count += 1;
    }
    count
}

/// Parses image text in the given format.
///
/// # Arguments
///
/// * `text` - File contents.
/// * `config` - Format and halt-rewrite settings.
/// * `capacity_words` - Memory depth in words.
pub fn parse_image(text: &str, config: &ImageConfig, capacity_words: usize) -> Result<ProgramImage, ImageError> {
    let format = match config.format {
        ImageFormat::Auto => detect_format(text),
        f => f,
    };
    let mut image = match format {
        ImageFormat::Verilog => pack_words(&parse_verilog_hex(text)?, capacity_words)?,
        ImageFormat::Words | ImageFormat::Auto => parse_word_hex(text)?,
    };
    if config.rewrite_halt {
        let n = rewrite_halt(&mut image);
        tracing::debug!(rewritten = n, "halt idiom rewrite");
    }
    Ok(image)
}

/// Reads and parses an image file.
pub fn load_image_file(
    path: impl AsRef<Path>,
    config: &ImageConfig,
    capacity_words: usize,
) -> Result<ProgramImage, ImageError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let image = parse_image(&text, config, capacity_words)?;
    tracing::info!(
        path = %path.display(),
        base = image.base,
        words = image.words.len(),
        "image loaded"
    );
    Ok(image)
}
