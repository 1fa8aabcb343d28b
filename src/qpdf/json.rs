use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;

/// Which `--json` layout to expect; the layout changed in qpdf 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonSchema {
    /// qpdf < 11: objects live in the top-level "objects" map.
    Objects,
    /// qpdf >= 11: objects live in the second element of the "qpdf" array,
    /// each wrapped in a "value" key.
    QpdfArray,
}

impl JsonSchema {
    pub fn for_version(version: u32) -> Self {
        if version < 11 {
            JsonSchema::Objects
        } else {
            JsonSchema::QpdfArray
        }
    }

    /// Pull the page dictionaries out of a decoded `--json` document, in the
    /// order the engine emitted them (document order).
    pub fn page_objects(self, info: &Value) -> Result<Vec<&Value>> {
        let objects = match self {
            JsonSchema::Objects => info.get("objects"),
            JsonSchema::QpdfArray => info.get("qpdf").and_then(|qpdf| qpdf.get(1)),
        }
        .and_then(Value::as_object)
        .ok_or_else(|| Error::UnexpectedOutput("no object table in engine JSON".into()))?;

        Ok(objects
            .values()
            .map(|object| object.get("value").unwrap_or(object))
            .filter(|object| object.get("/Type").and_then(Value::as_str) == Some("/Page"))
            .collect())
    }
}

/// Page dimensions in inches, in visual orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

/// Size of one page dictionary, or None when it carries no MediaBox.
///
/// The engine reports MediaBox as `[llx, lly, urx, ury]` in points; we keep
/// the upper-right corner scaled to inches. When /Rotate is an odd multiple
/// of 90 the reported box is sideways relative to what a viewer shows, so
/// width and height are swapped.
pub fn page_size(page: &Value) -> Option<PageSize> {
    let media_box = page.get("/MediaBox")?.as_array()?;
    let width = media_box.get(2)?.as_f64()? / 72.0;
    let height = media_box.get(3)?.as_f64()? / 72.0;

    let rotate = page.get("/Rotate").and_then(Value::as_i64).unwrap_or(0);
    if rotate % 180 != 0 {
        Some(PageSize {
            width: height,
            height: width,
        })
    } else {
        Some(PageSize { width, height })
    }
}
