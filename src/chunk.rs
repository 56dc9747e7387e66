// Text splitting for the processor: chapter headings first, then a
// size bound in characters. All counts are Unicode scalar values, so a
// bound never lands inside a multi-byte character.

use regex::Regex;

// Matches headings like "第12章 风起" and "第三十一章 归途".
const CHAPTER_PATTERN: &str = r"(第[0-9零一二三四五六七八九十百千万]+章\s[^\n]+)\n";

/// One titled piece of the input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub title: String,
    pub content: String,
}

/// Split on chapter headings. Returns None when no heading is found.
/// Text before the first heading is kept as a leading piece unless it
/// is blank.
pub fn split_chapters(content: &str) -> Option<Vec<Chunk>> {
    let re = Regex::new(CHAPTER_PATTERN).expect("chapter pattern is valid");
    let headings: Vec<(usize, usize, String)> = re
        .captures_iter(content)
        .map(|caps| {
            let whole = caps.get(0).expect("match has a full range");
            (whole.start(), whole.end(), caps[1].trim().to_string())
        })
        .collect();
    if headings.is_empty() {
        return None;
    }

    let mut chapters = Vec::new();
    let preamble = content[..headings[0].0].trim();
    if !preamble.is_empty() {
        chapters.push(Chunk {
            title: "前言".to_string(),
            content: preamble.to_string(),
        });
    }
    for (i, (_, end, title)) in headings.iter().enumerate() {
        let stop = if i + 1 < headings.len() {
            headings[i + 1].0
        } else {
            content.len()
        };
        chapters.push(Chunk {
            title: title.clone(),
            content: content[*end..stop].trim().to_string(),
        });
    }
    Some(chapters)
}

/// Split plain text into pieces of at most `max_chars` characters,
/// preferring paragraph boundaries and falling back to hard character
/// windows for a single oversized paragraph.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for paragraph in text.split("\n\n") {
        let para = paragraph.trim();
        if para.is_empty() {
            continue;
        }
        let para_len = para.chars().count();

        if current_len > 0 && current_len + para_len + 2 > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if para_len > max_chars {
            let mut window = String::new();
            let mut window_len = 0usize;
            for ch in para.chars() {
                window.push(ch);
                window_len += 1;
                if window_len == max_chars {
                    chunks.push(std::mem::take(&mut window));
                    window_len = 0;
                }
            }
            if window_len > 0 {
                chunks.push(window);
            }
        } else {
            if current_len > 0 {
                current.push_str("\n\n");
                current_len += 2;
            }
            current.push_str(para);
            current_len += para_len;
        }
    }
    if current_len > 0 {
        chunks.push(current);
    }
    chunks
}

/// Full splitting pass: chapter-aware when headings exist, size-bounded
/// either way. Heading-less text becomes a single `全文` chunk when it
/// fits, numbered `片段` chunks otherwise.
pub fn split_into_chunks(content: &str, chunk_size: usize) -> Vec<Chunk> {
    let chunk_size = chunk_size.max(1);
    let mut out = Vec::new();
    match split_chapters(content) {
        Some(chapters) => {
            for chapter in chapters {
                if chapter.content.chars().count() <= chunk_size {
                    out.push(chapter);
                } else {
                    let pieces = chunk_text(&chapter.content, chunk_size);
                    let total = pieces.len();
                    for (i, piece) in pieces.into_iter().enumerate() {
                        out.push(Chunk {
                            title: format!("{} ({}/{})", chapter.title, i + 1, total),
                            content: piece,
                        });
                    }
                }
            }
        }
        None => {
            log::warn!("未检测到章节标题，按固定大小分块处理");
            let trimmed = content.trim();
            if trimmed.chars().count() <= chunk_size {
                out.push(Chunk {
                    title: "全文".to_string(),
                    content: trimmed.to_string(),
                });
            } else {
                for (i, piece) in chunk_text(trimmed, chunk_size).into_iter().enumerate() {
                    out.push(Chunk {
                        title: format!("片段 {}", i + 1),
                        content: piece,
                    });
                }
            }
        }
    }
    out
}
