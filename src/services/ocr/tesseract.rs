use super::engine::{encode_png, OcrEngine};
use crate::error::OcrError;
use crate::models::bbox::BoundingBox;
use crate::models::config::OcrConfig;
use crate::models::ocr_result::RecognizedLine;
use image::DynamicImage;
use std::collections::HashMap;
use std::io::Write;
use std::process::{Command, Stdio};
use std::str::FromStr;
use tracing::debug;

/// TSV row levels emitted by Tesseract
const LEVEL_LINE: u32 = 4;
const LEVEL_WORD: u32 = 5;

/// Tesseract OCR engine driven through the `tesseract` executable
pub struct TesseractEngine {
    executable: String,
    languages: String,
    page_seg_mode: u8,
    char_blacklist: String,
}

impl TesseractEngine {
    /// Create an engine from OCR configuration
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            executable: config.tesseract_path.clone(),
            languages: config.languages.clone(),
            page_seg_mode: config.page_seg_mode,
            char_blacklist: config.char_blacklist.clone(),
        }
    }

    /// Command line for one recognition: PNG on stdin, TSV on stdout
    fn build_command(&self) -> Command {
        let mut command = Command::new(&self.executable);
        command
            .arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(&self.languages)
            .arg("--psm")
            .arg(self.page_seg_mode.to_string());

        if !self.char_blacklist.is_empty() {
            command
                .arg("-c")
                .arg(format!("tessedit_char_blacklist={}", self.char_blacklist));
        }

        command.arg("tsv");
        command
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize_lines(&self, image: &DynamicImage) -> Result<Vec<RecognizedLine>, OcrError> {
        let png = encode_png(image)?;

        let mut child = self
            .build_command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| OcrError::Unavailable(format!("{}: {}", self.executable, e)))?;

        // Feed stdin from a separate thread so a full stdout pipe cannot stall us
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| OcrError::Process("stdin not captured".to_string()))?;
        let writer = std::thread::spawn(move || stdin.write_all(&png));

        let output = child
            .wait_with_output()
            .map_err(|e| OcrError::Process(e.to_string()))?;

        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(OcrError::Process(format!("Failed to write image: {}", e))),
            Err(_) => return Err(OcrError::Process("stdin writer panicked".to_string())),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Process(format!("Tesseract failed: {}", stderr.trim())));
        }

        let tsv = String::from_utf8_lossy(&output.stdout);
        let lines = parse_tsv_lines(&tsv)?;
        debug!(count = lines.len(), "tesseract recognized lines");
        Ok(lines)
    }

    fn is_available(&self) -> bool {
        Command::new(&self.executable)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

/// Words collected for one (page, block, paragraph, line) key
#[derive(Default)]
struct LineAccumulator {
    line_box: Option<BoundingBox>,
    word_union: Option<BoundingBox>,
    words: Vec<String>,
    conf_sum: f32,
    conf_count: usize,
}

impl LineAccumulator {
    fn add_word(&mut self, text: &str, bbox: BoundingBox, conf: f32) {
        self.words.push(text.to_string());
        self.word_union = Some(match self.word_union {
            Some(u) => BoundingBox::new(
                u.x0.min(bbox.x0),
                u.y0.min(bbox.y0),
                u.x1.max(bbox.x1),
                u.y1.max(bbox.y1),
            ),
            None => bbox,
        });
        if conf >= 0.0 {
            self.conf_sum += conf;
            self.conf_count += 1;
        }
    }

    fn finish(self) -> Option<RecognizedLine> {
        if self.words.is_empty() {
            return None;
        }

        let bbox = self.line_box.or(self.word_union)?;
        let mut line = RecognizedLine::new(self.words.join(" "), bbox);
        if self.conf_count > 0 {
            line = line.with_confidence(self.conf_sum / self.conf_count as f32);
        }
        Some(line)
    }
}

/// Parse one numeric TSV column; out-of-range values are malformed output
fn column<T>(fields: &[&str], index: usize, row_index: usize) -> Result<T, OcrError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    fields[index].trim().parse::<T>().map_err(|e| {
        OcrError::MalformedOutput(format!("row {} column {}: {}", row_index + 1, index + 1, e))
    })
}

/// Parse Tesseract TSV output into text lines, in reading order.
///
/// The line row (level 4) supplies the box; word rows (level 5) supply the
/// text. Lines without words are dropped.
pub fn parse_tsv_lines(tsv: &str) -> Result<Vec<RecognizedLine>, OcrError> {
    let mut order: Vec<(u32, u32, u32, u32)> = Vec::new();
    let mut lines: HashMap<(u32, u32, u32, u32), LineAccumulator> = HashMap::new();

    for (row_index, row) in tsv.lines().enumerate() {
        let fields: Vec<&str> = row.split('\t').collect();

        // Header and blank rows
        let Ok(level) = fields[0].trim().parse::<u32>() else {
            continue;
        };
        if level != LEVEL_LINE && level != LEVEL_WORD {
            continue;
        }
        if fields.len() < 11 {
            return Err(OcrError::MalformedOutput(format!(
                "row {} has {} columns",
                row_index + 1,
                fields.len()
            )));
        }

        let key: (u32, u32, u32, u32) = (
            column(&fields, 1, row_index)?,
            column(&fields, 2, row_index)?,
            column(&fields, 3, row_index)?,
            column(&fields, 4, row_index)?,
        );
        let bbox = BoundingBox::from_xywh(
            column(&fields, 6, row_index)?,
            column(&fields, 7, row_index)?,
            column(&fields, 8, row_index)?,
            column(&fields, 9, row_index)?,
        )
        .ok_or_else(|| {
            OcrError::MalformedOutput(format!("row {}: box extends past i32 range", row_index + 1))
        })?;

        let entry = lines.entry(key).or_insert_with(|| {
            order.push(key);
            LineAccumulator::default()
        });

        if level == LEVEL_LINE {
            entry.line_box = Some(bbox);
            continue;
        }

        let text = fields.get(11).map(|t| t.trim()).unwrap_or("");
        if text.is_empty() {
            continue;
        }
        let conf = fields[10].trim().parse::<f32>().unwrap_or(-1.0);
        entry.add_word(text, bbox, conf);
    }

    Ok(order
        .into_iter()
        .filter_map(|key| lines.remove(&key))
        .filter_map(LineAccumulator::finish)
        .collect())
}
