use std::fmt::{self, Write};

use super::colors::AppColor;
use super::{DrawCommand, Frame};

/// Render a frame as a standalone SVG document.
pub fn to_svg(frame: &Frame) -> String {
    let mut svg = String::new();
    // Writing into a String cannot fail.
    let _ = write_svg(&mut svg, frame);
    svg
}

pub fn write_svg<W: Write>(out: &mut W, frame: &Frame) -> fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.2} {:.2}">"#,
        frame.width, frame.height, frame.width, frame.height
    )?;
    writeln!(
        out,
        r#"  <rect x="0" y="0" width="100%" height="100%" fill="{}"/>"#,
        frame.background.to_hex()
    )?;

    for command in &frame.commands {
        match command {
            DrawCommand::Fill { rect, color } => writeln!(
                out,
                r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"{}/>"#,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                color.to_hex(),
                opacity_attr("fill-opacity", color)
            )?,
            DrawCommand::Border { rect, color } => writeln!(
                out,
                r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="{}"{}/>"#,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                color.to_hex(),
                opacity_attr("stroke-opacity", color)
            )?,
            DrawCommand::Label { text, at, color } => writeln!(
                out,
                r#"  <text x="{:.2}" y="{:.2}" font-family="monospace" fill="{}">{}</text>"#,
                at.x,
                at.y,
                color.to_hex(),
                escape_text(text)
            )?,
        }
    }

    writeln!(out, "</svg>")
}

fn opacity_attr(name: &str, color: &AppColor) -> String {
    if color.a >= 1.0 {
        String::new()
    } else {
        format!(r#" {}="{:.2}""#, name, color.a)
    }
}

fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
