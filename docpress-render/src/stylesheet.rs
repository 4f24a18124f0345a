//! Fixed stylesheet shipped with every conversion payload.

/// Default print stylesheet: A4 page, 1.5 cm margins, bordered tables,
/// header/footer styling. Passed to the document converter alongside the
/// rendered markup of every document.
pub const DEFAULT_STYLESHEET: &str = "\
@page { size: A4; margin: 1.5cm; }
body {
    font-family: 'DejaVu Sans', 'Arial', sans-serif;
    font-size: 11pt;
}
table { width: 100%; border-collapse: collapse; margin: 1em 0; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #f2f2f2; }
.header { font-size: 1.5em; font-weight: bold; margin-bottom: 1em; color: #333; }
.footer { font-size: 0.8em; color: #666; margin-top: 2em; text-align: center; }
";
