//! Standalone HTML pages around converted markup

use pic2html::Conversion;
use pic2html::markup::escape_attribute;

/// Page start, up to where the markup block goes
pub const PAGE_TOP: &str = "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
    <title>pic2html</title>\n</head>\n<body bgcolor=\"#202020\">\n";

/// Closes the table the markup block leaves open, then the page
pub const PAGE_BOTTOM: &str = "</td></tr></table>\n</body>\n</html>\n";

/// Closes an error block
pub const PAGE_ERROR_BOTTOM: &str = "</body>\n</html>\n";

/// Render a full page for a finished conversion
///
/// The rendering time footer sits inside the markup table, below the image.
pub fn render_page(conversion: &Conversion) -> String {
    let mut page = String::with_capacity(
        PAGE_TOP.len() + conversion.markup.len() + PAGE_BOTTOM.len() + 96,
    );
    page.push_str(PAGE_TOP);
    page.push_str(&conversion.markup);
    page.push_str(&format!(
        "\n<FONT COLOR=LIGHTBLUE SIZE=2>Rendering time: {:?}</FONT><BR>\n",
        conversion.elapsed
    ));
    page.push_str(PAGE_BOTTOM);
    page
}

/// Error message block in the page's style
pub fn error_block(message: &str) -> String {
    format!(
        "<table align=center><tr bgcolor=black><td><font color=lightblue size=4>Error: {}\
         </font></td></tr></table>\n",
        escape_attribute(message)
    )
}

/// Render a full page reporting an error
pub fn render_error_page(message: &str) -> String {
    format!("{}{}{}", PAGE_TOP, error_block(message), PAGE_ERROR_BOTTOM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_render_page_wraps_markup() {
        let conversion = Conversion {
            markup: "<table><tr><td>MARKUP".to_string(),
            columns: 1,
            rows: 1,
            elapsed: Duration::from_millis(3),
        };
        let page = render_page(&conversion);

        assert!(page.starts_with(PAGE_TOP));
        assert!(page.ends_with(PAGE_BOTTOM));
        assert!(page.contains("MARKUP\n<FONT COLOR=LIGHTBLUE SIZE=2>Rendering time: 3ms</FONT>"));
    }

    #[test]
    fn test_error_block_escapes_message() {
        assert_eq!(
            error_block("No <image> submitted."),
            "<table align=center><tr bgcolor=black><td><font color=lightblue size=4>\
             Error: No &lt;image&gt; submitted.</font></td></tr></table>\n"
        );
    }

    #[test]
    fn test_render_error_page() {
        let page = render_error_page("bad");
        assert!(page.contains("Error: bad"));
        assert!(page.ends_with(PAGE_ERROR_BOTTOM));
    }
}
