//! SVG output for a laid-out topic map.
//!
//! Each drawn node becomes a `<g>` holding its own `<clipPath>`, the filled
//! circle and the image cropped to that circle. In-memory images are
//! embedded as base64 `data:` URIs.

use std::path::Path;

use base64::Engine;
use svg::node::element::{Circle, ClipPath, Definitions, Group, Image, Text};
use svg::Document;
use thiserror::Error;

use crate::model::ImageRef;
use crate::render::scene::{LayoutResult, SceneNode};
use crate::render::STROKE_WIDTH;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub fn export_svg(result: &LayoutResult, path: &Path) -> Result<(), ExportError> {
    let document = scene_to_svg_document(result);
    svg::save(path, &document).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    log::info!(
        "wrote {} ({} nodes, {:.0}x{:.0})",
        path.display(),
        result.nodes.len(),
        result.canvas_width,
        result.canvas_height
    );
    Ok(())
}

pub fn scene_to_svg_document(result: &LayoutResult) -> Document {
    let mut document = Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set("width", result.canvas_width)
        .set("height", result.canvas_height)
        .set(
            "viewBox",
            format!("0 0 {} {}", result.canvas_width, result.canvas_height),
        );

    if let Some(label) = &result.label {
        let text = Text::new(label.text.clone())
            .set("x", label.x)
            .set("y", label.y)
            .set("text-anchor", "middle")
            .set("fill", "black")
            .set("font-size", label.font_size)
            .set("font-weight", "bold");
        document = document.add(text);
    }

    for node in &result.nodes {
        document = document.add(node_group(node));
    }

    document
}

fn node_group(node: &SceneNode) -> Group {
    let clip = ClipPath::new().set("id", node.clip_id.clone()).add(
        Circle::new()
            .set("cx", node.cx)
            .set("cy", node.cy)
            .set("r", node.radius),
    );

    let circle = Circle::new()
        .set("cx", node.cx)
        .set("cy", node.cy)
        .set("r", node.radius)
        .set("fill", node.style.fill_name())
        .set("stroke", "black")
        .set("stroke-width", STROKE_WIDTH);

    let image = Image::new()
        .set("href", image_href(&node.image))
        .set("x", node.cx - node.radius)
        .set("y", node.cy - node.radius)
        .set("width", node.radius * 2.0)
        .set("height", node.radius * 2.0)
        .set("clip-path", format!("url(#{})", node.clip_id));

    Group::new()
        .set("data-node", node.index.to_string())
        .add(Definitions::new().add(clip))
        .add(circle)
        .add(image)
}

fn image_href(image: &ImageRef) -> String {
    match image {
        ImageRef::Url(url) => url.clone(),
        ImageRef::Bytes { data, .. } => {
            let mime = image::guess_format(data)
                .map(|format| format.to_mime_type())
                .unwrap_or("application/octet-stream");
            format!(
                "data:{};base64,{}",
                mime,
                base64::engine::general_purpose::STANDARD.encode(data)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::model::{CentralNode, Item};
    use crate::engine::pipeline::RadialEngine;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn sample() -> LayoutResult {
        let engine = RadialEngine::new(LayoutConfig::default()).unwrap();
        let central = CentralNode::new("Physics", Some(ImageRef::bytes("central:Physics", PNG_MAGIC.to_vec())));
        let items = vec![
            Item::new("a", Some(ImageRef::Url("http://x/images/a".into())), "Physics"),
            Item::new("b", None, "Physics"),
            Item::new("c", Some(ImageRef::Url("http://x/images/c".into())), "Physics"),
        ];
        engine.layout(Some(&central), &items)
    }

    #[test]
    fn one_clip_path_per_drawn_node() {
        let result = sample();
        let svg = scene_to_svg_document(&result).to_string();
        assert_eq!(svg.matches("<clipPath").count(), 3);

        let ids: Vec<&str> = result.nodes.iter().map(|n| n.clip_id.as_str()).collect();
        assert!(ids[0].starts_with("clip-physics-") && ids[0].ends_with("-0"));
        assert!(ids[2].ends_with("-3"));
        assert!(svg.contains(&format!("id=\"{}\"", ids[0])));
        assert!(svg.contains(&format!("url(#{})", ids[2])));
        // node 2 has no image
        assert!(!ids.iter().any(|id| id.ends_with("-2")));
    }

    #[test]
    fn label_and_fills() {
        let svg = scene_to_svg_document(&sample()).to_string();
        assert!(svg.contains("<text"));
        assert!(svg.contains("Physics"));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("lightblue"));
        assert_eq!(svg.matches("lightgreen").count(), 2);
    }

    #[test]
    fn byte_images_become_data_uris() {
        let svg = scene_to_svg_document(&sample()).to_string();
        assert!(svg.contains("data:image/png;base64,"));
        assert!(svg.contains("http://x/images/a"));
    }

    #[test]
    fn export_writes_file() {
        let path = std::env::temp_dir().join(format!("talkmap-export-{}.svg", std::process::id()));
        export_svg(&sample(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
        std::fs::remove_file(&path).ok();
    }
}
