use crate::models::config::SamplerConfig;
use crate::models::ocr_result::RecognizedLine;
use crate::models::person::{PersonRecord, StatusTag};
use crate::services::marker::{sample_status_color, PixelSource};
use crate::services::ocr::parser::{contains_target_script, parse_name_code};
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, info};

/// Turn one OCR line into a person, or None for noise
fn line_to_person<P: PixelSource + ?Sized>(
    line: &RecognizedLine,
    pixels: &P,
    config: &SamplerConfig,
) -> Option<PersonRecord> {
    let text = line.text.trim();
    if text.is_empty() {
        return None;
    }
    if !contains_target_script(text) {
        debug!(text, "skipping line without Arabic text");
        return None;
    }

    let parsed = parse_name_code(text);
    if parsed.name.is_empty() {
        return None;
    }

    let class = sample_status_color(line.bbox, pixels, config);
    let status = StatusTag::from(class);
    debug!(name = %parsed.name, code = %parsed.code, ?class, ?status, "line classified");

    Some(PersonRecord::new(parsed.name, parsed.code, status))
}

/// Keep the first record for each trimmed `name|code` key, preserving order
pub fn dedup_people(people: Vec<PersonRecord>) -> Vec<PersonRecord> {
    let mut seen = HashSet::new();
    people
        .into_iter()
        .filter(|person| seen.insert(person.dedup_key()))
        .collect()
}

/// Build the roster from OCR lines and the decoded source image.
///
/// Lines are classified independently (in parallel) and the result keeps
/// input order. Never fails; an image without usable lines gives an empty list.
pub fn aggregate<P: PixelSource + Sync + ?Sized>(
    lines: &[RecognizedLine],
    pixels: &P,
    config: &SamplerConfig,
) -> Vec<PersonRecord> {
    let people: Vec<PersonRecord> = lines
        .par_iter()
        .map(|line| line_to_person(line, pixels, config))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect();

    let parsed = people.len();
    let people = dedup_people(people);
    info!(
        lines = lines.len(),
        parsed,
        people = people.len(),
        "roster aggregated"
    );
    people
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bbox::BoundingBox;
    use image::{Rgba, RgbaImage};

    const GREEN: Rgba<u8> = Rgba([39, 174, 96, 255]);
    const PURPLE: Rgba<u8> = Rgba([155, 89, 182, 255]);
    const RED: Rgba<u8> = Rgba([231, 76, 60, 255]);

    /// White canvas with one marker dot right of each given line box
    fn roster_image(rows: &[(BoundingBox, Rgba<u8>)]) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(200, 200, Rgba([255, 255, 255, 255]));
        for (bbox, color) in rows {
            let mid = (bbox.y0 + bbox.y1) / 2;
            for y in (mid - 5)..(mid + 5) {
                for x in (bbox.x1 + 8)..(bbox.x1 + 18) {
                    img.put_pixel(x as u32, y as u32, *color);
                }
            }
        }
        img
    }

    fn row(index: i32) -> BoundingBox {
        BoundingBox::new(0, index * 30, 100, index * 30 + 20)
    }

    #[test]
    fn test_end_to_end_single_line() {
        let img = roster_image(&[(row(0), GREEN)]);
        let lines = vec![RecognizedLine::new("🟢 سارة N-1", BoundingBox::new(0, 0, 100, 20))];

        let people = aggregate(&lines, &img, &SamplerConfig::default());
        assert_eq!(people, vec![PersonRecord::new("سارة", "N-1", StatusTag::Field)]);
    }

    #[test]
    fn test_status_mapping_per_marker() {
        let img = roster_image(&[(row(0), GREEN), (row(1), PURPLE), (row(2), RED)]);
        let lines = vec![
            RecognizedLine::new("N-1 سارة", row(0)),
            RecognizedLine::new("N-2 حسين", row(1)),
            RecognizedLine::new("N-3 خالد", row(2)),
            RecognizedLine::new("N-4 فهد", row(3)),
        ];

        let people = aggregate(&lines, &img, &SamplerConfig::default());
        let statuses: Vec<StatusTag> = people.iter().map(|p| p.status).collect();
        assert_eq!(
            statuses,
            vec![StatusTag::Field, StatusTag::Busy, StatusTag::Oos, StatusTag::Field]
        );
    }

    #[test]
    fn test_duplicates_keep_first_status() {
        let img = roster_image(&[(row(0), PURPLE), (row(1), RED)]);
        let lines = vec![
            RecognizedLine::new("حسين - N-6", row(0)),
            RecognizedLine::new("N-6 حسين", row(1)),
        ];

        let people = aggregate(&lines, &img, &SamplerConfig::default());
        assert_eq!(people, vec![PersonRecord::new("حسين", "N-6", StatusTag::Busy)]);
    }

    #[test]
    fn test_same_name_different_code_is_kept() {
        let img = roster_image(&[]);
        let lines = vec![
            RecognizedLine::new("N-6 حسين", row(0)),
            RecognizedLine::new("N-7 حسين", row(1)),
            RecognizedLine::new("حسين", row(2)),
        ];

        let people = aggregate(&lines, &img, &SamplerConfig::default());
        assert_eq!(people.len(), 3);
    }

    #[test]
    fn test_latin_noise_is_excluded() {
        let img = roster_image(&[(row(0), GREEN), (row(1), GREEN)]);
        let lines = vec![
            RecognizedLine::new("Ali - N-6", row(0)),
            RecognizedLine::new("N-1 سارة", row(1)),
            RecognizedLine::new("~~ ** ~~", row(2)),
        ];

        let people = aggregate(&lines, &img, &SamplerConfig::default());
        assert_eq!(people, vec![PersonRecord::new("سارة", "N-1", StatusTag::Field)]);
    }

    #[test]
    fn test_empty_and_marker_only_lines_are_excluded() {
        let img = roster_image(&[]);
        let lines = vec![
            RecognizedLine::new("   ", row(0)),
            RecognizedLine::new("", row(1)),
        ];

        assert!(aggregate(&lines, &img, &SamplerConfig::default()).is_empty());
        assert!(aggregate(&[], &img, &SamplerConfig::default()).is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let img = roster_image(&[]);
        let names = ["أحمد", "بدر", "تركي", "ثامر", "جاسم", "حمد"];
        let lines: Vec<RecognizedLine> = names
            .iter()
            .enumerate()
            .map(|(i, name)| RecognizedLine::new(*name, row(i as i32)))
            .collect();

        let people = aggregate(&lines, &img, &SamplerConfig::default());
        let got: Vec<&str> = people.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(got, names);
    }

    #[test]
    fn test_dedup_people() {
        let people = vec![
            PersonRecord::new("حسين", "N-6", StatusTag::Oos),
            PersonRecord::new("سارة", "", StatusTag::Field),
            PersonRecord::new("حسين ", " N-6", StatusTag::Field),
        ];
        let deduped = dedup_people(people);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].status, StatusTag::Oos);
        assert_eq!(deduped[1].name, "سارة");
    }
}
