//! Static HTML export of the active page.
//!
//! Elements become absolutely positioned divs inside a fixed-size canvas
//! container, emitted back to front so source order matches paint order.
//! Circles pick up a full border radius and text boxes render with a
//! transparent background and their fill color as the text color.

use std::fmt::Write;

use vellum_core::{layers, CanvasConfig, Element, Shape};

/// Render the elements as a self-contained HTML document.
pub fn export_html(elements: &[Element], canvas: &CanvasConfig) -> String {
    log::info!("exporting {} elements as HTML", elements.len());
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>Exported Design</title>\n\
         <style>\n\
         body {{ margin: 0; padding: 20px; font-family: system-ui, sans-serif; }}\n\
         .canvas {{ position: relative; width: {}px; height: {}px; background: white; border: 1px solid #ccc; }}\n\
         .element {{ position: absolute; display: flex; align-items: center; justify-content: center; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <div class=\"canvas\">\n",
        canvas.width, canvas.height
    );

    for id in layers::paint_order(elements) {
        let Some(element) = elements.iter().find(|e| e.id == id) else {
            continue;
        };
        let _ = writeln!(html, "  <div class=\"element\" style=\"{}\">{}</div>", element_style(element), element_content(element));
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn element_style(element: &Element) -> String {
    let mut style = format!(
        "left: {}px; top: {}px; width: {}px; height: {}px; \
         background-color: {}; transform: rotate({}deg); z-index: {};",
        element.x,
        element.y,
        element.width,
        element.height,
        element.background_color,
        element.rotation,
        element.z_index,
    );
    match element.shape {
        Shape::Circle => style.push_str(" border-radius: 50%;"),
        Shape::Text => {
            let _ = write!(
                style,
                " color: {0}; background: transparent; border: 1px solid {0};",
                element.background_color
            );
        }
        _ => {}
    }
    style
}

fn element_content(element: &Element) -> String {
    match element.shape {
        Shape::Text => escape(&element.text_content),
        _ => String::new(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> CanvasConfig {
        CanvasConfig::default()
    }

    #[test]
    fn test_document_skeleton() {
        let html = export_html(&[], &canvas());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("width: 1200px; height: 800px"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_circle_gets_border_radius() {
        let elements = vec![Element::new(1, Shape::Circle, 0.0, 0.0, 100.0, 100.0, 0)];
        let html = export_html(&elements, &canvas());
        assert!(html.contains("border-radius: 50%;"));
    }

    #[test]
    fn test_text_renders_content_transparent() {
        let mut element = Element::new(1, Shape::Text, 0.0, 0.0, 120.0, 40.0, 0);
        element.text_content = "Hello <world>".to_string();
        let html = export_html(&[element], &canvas());
        assert!(html.contains("background: transparent"));
        assert!(html.contains("Hello &lt;world&gt;"));
    }

    #[test]
    fn test_elements_emitted_back_to_front() {
        let mut back = Element::new(1, Shape::Rectangle, 0.0, 0.0, 10.0, 10.0, 5);
        back.background_color = "#111111".to_string();
        let mut front = Element::new(2, Shape::Rectangle, 0.0, 0.0, 10.0, 10.0, 9);
        front.background_color = "#222222".to_string();
        // Stored front-first; export must reorder.
        let html = export_html(&[front, back], &canvas());
        let back_at = html.find("#111111").unwrap();
        let front_at = html.find("#222222").unwrap();
        assert!(back_at < front_at);
    }
}
