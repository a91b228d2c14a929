//! Minimal SVG document writer.
//!
//! Builds the diagram as a string with `fmt::Write` -- no I/O here. Pattern
//! tiles live in a `<defs>` block and are referenced by `fill="url(#id)"`;
//! tooltips are `<title>` children of their rectangles, so the text travels
//! with the shape instead of being wired up by script.

use std::fmt::Write;

/// Escape the five XML special characters for safe embedding in element
/// text content and attribute values.
pub fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Format a coordinate or data value: two decimals, trailing zeros trimmed,
/// so `0.0` renders as `0` and `18.5` as `18.5`.
pub fn fmt_num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Rectangle fill: a solid color or a reference to a registered pattern tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fill {
    Solid(String),
    Pattern(String),
}

impl Fill {
    pub fn attr(&self) -> String {
        match self {
            Fill::Solid(color) => color.clone(),
            Fill::Pattern(id) => format!("url(#{})", id),
        }
    }
}

/// An SVG document under construction.
#[derive(Debug)]
pub struct SvgDoc {
    width: u32,
    height: u32,
    defs: String,
    body: String,
}

impl SvgDoc {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            defs: String::new(),
            body: String::new(),
        }
    }

    /// Register a 100x100 image tile under `id`. Callers deduplicate ids.
    pub fn add_pattern(&mut self, id: &str, href: &str) {
        let _ = writeln!(
            self.defs,
            r#"    <pattern id="{}" patternUnits="userSpaceOnUse" width="100" height="100"><image href="{}" x="0" y="0" width="100" height="100"/></pattern>"#,
            xml_escape(id),
            xml_escape(href),
        );
    }

    pub fn open_group(&mut self, class: &str) {
        let _ = writeln!(self.body, r#"  <g class="{}">"#, xml_escape(class));
    }

    pub fn close_group(&mut self) {
        self.body.push_str("  </g>\n");
    }

    /// Emit a stroked rectangle, optionally with an id and a `<title>` tooltip.
    pub fn rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: &Fill,
        class: &str,
        id: Option<&str>,
        tooltip: Option<&str>,
    ) {
        let _ = write!(self.body, "    <rect");
        if let Some(id) = id {
            let _ = write!(self.body, r#" id="{}""#, xml_escape(id));
        }
        if !class.is_empty() {
            let _ = write!(self.body, r#" class="{}""#, xml_escape(class));
        }
        let _ = write!(
            self.body,
            r#" x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="black" stroke-width="1""#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(width),
            fmt_num(height),
            xml_escape(&fill.attr()),
        );
        match tooltip {
            Some(tip) => {
                let _ = writeln!(self.body, "><title>{}</title></rect>", xml_escape(tip));
            }
            None => {
                self.body.push_str("/>\n");
            }
        }
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let _ = writeln!(
            self.body,
            r#"    <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="1"/>"#,
            fmt_num(x1),
            fmt_num(y1),
            fmt_num(x2),
            fmt_num(y2),
        );
    }

    pub fn text(&mut self, x: f64, y: f64, class: &str, anchor: Option<&str>, content: &str) {
        let _ = write!(
            self.body,
            r#"    <text x="{}" y="{}" class="{}""#,
            fmt_num(x),
            fmt_num(y),
            xml_escape(class),
        );
        if let Some(anchor) = anchor {
            let _ = write!(self.body, r#" text-anchor="{}""#, anchor);
        }
        let _ = writeln!(self.body, ">{}</text>", xml_escape(content));
    }

    /// Text rotated 90 degrees counter-clockwise about its anchor point
    /// (vertical axis titles).
    pub fn rotated_text(&mut self, x: f64, y: f64, class: &str, content: &str) {
        let _ = writeln!(
            self.body,
            r#"    <text transform="translate({}, {}) rotate(-90)" class="{}" text-anchor="middle">{}</text>"#,
            fmt_num(x),
            fmt_num(y),
            xml_escape(class),
            xml_escape(content),
        );
    }

    /// Assemble the final document.
    pub fn finish(self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );
        out.push_str(concat!(
            "  <style>\n",
            "    text { font-family: sans-serif; font-size: 9px; fill: black; }\n",
            "    .site_title { font-size: 12px; font-weight: bold; }\n",
            "    .y_axis_label, .x_axis_label { font-size: 11px; }\n",
            "  </style>\n",
        ));
        if !self.defs.is_empty() {
            out.push_str("  <defs id=\"definitions\">\n");
            out.push_str(&self.defs);
            out.push_str("  </defs>\n");
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}
