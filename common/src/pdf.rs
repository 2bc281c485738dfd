//! PDF metadata helpers backing the thumbnail / page-count service.
//!
//! Both functions are pure functions of the input bytes and degrade instead
//! of failing: an unreadable document yields a zero page count and an empty
//! preview, never an error. Rasterising page content is a canvas concern the
//! client does not take on; the preview is a page card sized to the first
//! page's MediaBox so the grid shows true proportions.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use lopdf::{Document, Object};

const US_LETTER: (f64, f64) = (612.0, 792.0);

/// Number of pages in the document, 0 when the bytes do not parse.
pub fn page_count(bytes: &[u8]) -> u32 {
    Document::load_mem(bytes)
        .map(|doc| doc.get_pages().len() as u32)
        .unwrap_or(0)
}

/// Data-URL preview for page 1, empty string when the bytes do not parse.
pub fn preview_data_url(bytes: &[u8]) -> String {
    let Ok(doc) = Document::load_mem(bytes) else {
        return String::new();
    };
    let count = doc.get_pages().len() as u32;
    if count == 0 {
        return String::new();
    }
    let (width, height) = first_page_size(&doc);
    let svg = page_card_svg(width, height, count);
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

fn first_page_size(doc: &Document) -> (f64, f64) {
    let pages = doc.get_pages();
    let Some((_, &page_id)) = pages.iter().next() else {
        return US_LETTER;
    };
    let Ok(dict) = doc.get_object(page_id).and_then(|obj| obj.as_dict()) else {
        return US_LETTER;
    };
    media_box(doc, dict)
        .map(|[x1, y1, x2, y2]| ((x2 - x1).abs(), (y2 - y1).abs()))
        .unwrap_or(US_LETTER)
}

/// MediaBox from the page dictionary, inheriting one level from the parent
/// Pages node when the page itself omits it.
fn media_box(doc: &Document, page_dict: &lopdf::Dictionary) -> Option<[f64; 4]> {
    if let Ok(direct) = page_dict.get(b"MediaBox") {
        if let Ok(array) = direct.as_array() {
            return box_values(array);
        }
    }
    let parent_id = page_dict.get(b"Parent").ok()?.as_reference().ok()?;
    let parent = doc.get_object(parent_id).ok()?.as_dict().ok()?;
    box_values(parent.get(b"MediaBox").ok()?.as_array().ok()?)
}

fn box_values(array: &[Object]) -> Option<[f64; 4]> {
    if array.len() != 4 {
        return None;
    }
    let mut values = [0.0; 4];
    for (slot, obj) in values.iter_mut().zip(array) {
        *slot = match obj {
            Object::Integer(n) => *n as f64,
            Object::Real(r) => *r as f64,
            _ => return None,
        };
    }
    Some(values)
}

fn page_card_svg(width: f64, height: f64, count: u32) -> String {
    let aspect = if width > 0.0 { height / width } else { 792.0 / 612.0 };
    let card_w = 120.0;
    let card_h = (card_w * aspect).clamp(60.0, 200.0);
    let pages = if count == 1 { "page" } else { "pages" };
    format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{card_w:.0}' height='{card_h:.0}' \
         viewBox='0 0 {card_w:.0} {card_h:.0}'>\
         <rect width='100%' height='100%' fill='white' stroke='rgb(203,208,214)'/>\
         <rect x='14' y='16' width='70' height='6' rx='2' fill='rgb(229,232,235)'/>\
         <rect x='14' y='30' width='92' height='4' rx='2' fill='rgb(238,240,242)'/>\
         <rect x='14' y='40' width='92' height='4' rx='2' fill='rgb(238,240,242)'/>\
         <rect x='14' y='50' width='64' height='4' rx='2' fill='rgb(238,240,242)'/>\
         <text x='50%' y='{label_y:.0}' text-anchor='middle' font-family='sans-serif' \
         font-size='10' fill='rgb(112,117,122)'>{count} {pages}</text>\
         </svg>",
        label_y = card_h - 8.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Document, Object};

    /// In-memory document with `num_pages` empty US-Letter pages.
    fn sample_pdf(num_pages: u32) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut kids = Vec::new();
        for _ in 0..num_pages {
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(Object::Reference(page_id));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => num_pages as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn counts_pages() {
        assert_eq!(page_count(&sample_pdf(3)), 3);
        assert_eq!(page_count(&sample_pdf(1)), 1);
    }

    #[test]
    fn unparseable_bytes_yield_zero_and_empty() {
        assert_eq!(page_count(b"not a pdf"), 0);
        assert_eq!(preview_data_url(b"not a pdf"), "");
        assert_eq!(page_count(&[]), 0);
    }

    #[test]
    fn preview_is_a_data_url() {
        let url = preview_data_url(&sample_pdf(2));
        assert!(url.starts_with("data:image/svg+xml;base64,"));
        let svg = STANDARD
            .decode(url.trim_start_matches("data:image/svg+xml;base64,"))
            .unwrap();
        let svg = String::from_utf8(svg).unwrap();
        assert!(svg.contains("2 pages"));
    }
}
