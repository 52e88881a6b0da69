//! Classify command - tell whether ICD-10 codes denote cancer.

use colored::{ColoredString, Colorize};
use dircheck::Classification;
use dircheck::coding::{is_cancer_chapter, is_cancer_code};

pub fn run(codes: Vec<String>, chapter: bool) -> Result<(), Box<dyn std::error::Error>> {
    let width = codes.iter().map(|c| c.len()).max().unwrap_or(0);
    for code in &codes {
        let classification = if chapter {
            is_cancer_chapter(code)
        } else {
            is_cancer_code(code)
        };
        println!("{:<width$}  {}", code, paint(classification), width = width);
    }
    Ok(())
}

fn paint(classification: Classification) -> ColoredString {
    let text = classification.to_string();
    match classification {
        Classification::Cancer => text.red().bold(),
        Classification::NotCancer => text.green(),
        Classification::Unknown => text.dimmed(),
    }
}
