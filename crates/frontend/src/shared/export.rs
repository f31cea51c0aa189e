//! Browser downloads: CSV exports and files fetched from the API (invoice PDFs).

use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Rows that can be written to a CSV file.
pub trait CsvExportable {
    fn headers() -> Vec<&'static str>;

    fn to_csv_row(&self) -> Vec<String>;
}

/// Build CSV text: UTF-8 BOM (so spreadsheet apps detect the encoding),
/// comma separated, CRLF line endings.
pub fn to_csv<T: CsvExportable>(rows: &[T]) -> String {
    let mut csv = String::from('\u{FEFF}');
    csv.push_str(&T::headers().join(","));
    csv.push_str("\r\n");
    for row in rows {
        let cells: Vec<String> = row.to_csv_row().iter().map(|c| escape_csv_cell(c)).collect();
        csv.push_str(&cells.join(","));
        csv.push_str("\r\n");
    }
    csv
}

fn escape_csv_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

pub fn export_csv<T: CsvExportable>(rows: &[T], filename: &str) -> Result<(), String> {
    if rows.is_empty() {
        return Err("Nothing to export".to_string());
    }
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(&to_csv(rows)));
    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");
    let blob = Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;
    download_blob(&blob, filename)
}

/// Offer raw bytes to the user as a file.
pub fn save_bytes(bytes: &[u8], filename: &str, mime: &str) -> Result<(), String> {
    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes));
    let properties = BlobPropertyBag::new();
    properties.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;
    download_blob(&blob, filename)
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, f64);

    impl CsvExportable for Row {
        fn headers() -> Vec<&'static str> {
            vec!["Category", "Amount"]
        }

        fn to_csv_row(&self) -> Vec<String> {
            vec![self.0.to_string(), format!("{:.2}", self.1)]
        }
    }

    #[test]
    fn test_escape_csv_cell() {
        assert_eq!(escape_csv_cell("Rent"), "Rent");
        assert_eq!(escape_csv_cell("Rent, office"), "\"Rent, office\"");
        assert_eq!(escape_csv_cell("5\" pipe"), "\"5\"\" pipe\"");
    }

    #[test]
    fn test_to_csv() {
        let csv = to_csv(&[Row("Salaries", 1200.0), Row("Rent, office", 300.5)]);
        assert_eq!(
            csv,
            "\u{FEFF}Category,Amount\r\nSalaries,1200.00\r\n\"Rent, office\",300.50\r\n"
        );
    }
}
