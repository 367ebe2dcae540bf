//! Topic loading: everything one topic map needs, gathered from a
//! [`TalkSource`].
//!
//! Fetch failures degrade the map instead of failing it. A topic whose
//! image cannot be fetched gets an image-less topic node, and a topic whose
//! listing fails is shown with no recordings.

use rayon::prelude::*;

use crate::model::{CentralNode, Item};
use crate::net::fetch::TalkSource;

/// Input for one engine pass
#[derive(Debug, Clone, PartialEq)]
pub struct TopicData {
    pub topic: String,
    pub central: CentralNode,
    pub items: Vec<Item>,
}

pub fn load_topic<S: TalkSource + ?Sized>(source: &S, topic: &str) -> TopicData {
    let image = match source.fetch_central_image(topic) {
        Ok(image) => image,
        Err(e) => {
            log::warn!("topic image for {}: {}", topic, e);
            None
        }
    };

    let items = match source.fetch_child_items(topic) {
        Ok(items) => items,
        Err(e) => {
            log::warn!("recordings for {}: {}", topic, e);
            Vec::new()
        }
    };

    log::debug!("loaded {} with {} recordings", topic, items.len());

    TopicData {
        topic: topic.to_string(),
        central: CentralNode::new(topic, image),
        items,
    }
}

/// Alphabetical topic order for pickers, ignoring case.
pub fn sort_topics(topics: &mut [String]) {
    topics.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
}

/// Load several topics in parallel. Output order follows `topics`.
pub fn load_topics<S: TalkSource + ?Sized>(source: &S, topics: &[String]) -> Vec<TopicData> {
    topics
        .par_iter()
        .map(|topic| load_topic(source, topic))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::pipeline::RadialEngine;
    use crate::model::ImageRef;
    use crate::net::memory::MemoryTalkSource;

    fn items(topic: &str, n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| {
                Item::new(
                    format!("{}_{}", topic.to_lowercase(), i),
                    Some(ImageRef::Url(format!("http://x/images/{i}"))),
                    topic,
                )
            })
            .collect()
    }

    fn source() -> MemoryTalkSource {
        MemoryTalkSource::new()
            .with_topic("Physics", items("Physics", 10))
            .with_topic("Biology", items("Biology", 25))
            .with_topic("History", Vec::new())
            .with_central_image("Physics", ImageRef::bytes("central:Physics", vec![0u8; 4]))
            .with_broken_topic("Chemistry")
            .with_topic("Geology", items("Geology", 4))
            .with_central_image("Geology", ImageRef::bytes("central:Geology", vec![0u8; 4]))
            .with_broken_central_image("Geology")
    }

    #[test]
    fn topic_with_image_and_items() {
        let data = load_topic(&source(), "Physics");
        assert_eq!(data.topic, "Physics");
        assert_eq!(data.central.label, "Physics");
        assert!(data.central.image.is_some());
        assert_eq!(data.items.len(), 10);
    }

    #[test]
    fn missing_image_leaves_topic_node_bare() {
        let data = load_topic(&source(), "Biology");
        assert!(data.central.image.is_none());
        assert_eq!(data.items.len(), 25);

        let result = RadialEngine::default().layout(Some(&data.central), &data.items);
        assert_eq!(result.missing_images, vec![0]);
        assert_eq!(result.nodes.len(), 25);
    }

    #[test]
    fn failed_image_request_leaves_topic_node_bare() {
        let data = load_topic(&source(), "Geology");
        assert_eq!(data.central.label, "Geology");
        assert!(data.central.image.is_none());
        assert_eq!(data.items.len(), 4);

        let result = RadialEngine::default().layout(Some(&data.central), &data.items);
        assert_eq!(result.missing_images, vec![0]);
        assert_eq!(result.nodes.len(), 4);
    }

    #[test]
    fn failed_listing_gives_empty_map() {
        let data = load_topic(&source(), "Chemistry");
        assert!(data.items.is_empty());
    }

    #[test]
    fn topics_sort_alphabetically_ignoring_case() {
        let mut topics: Vec<String> = ["physics", "Biology", "History", "biology", "Art"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        sort_topics(&mut topics);
        assert_eq!(topics, vec!["Art", "Biology", "biology", "History", "physics"]);
    }

    #[test]
    fn parallel_load_keeps_order() {
        let topics: Vec<String> = ["History", "Physics", "Biology"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        let loaded = load_topics(&source(), &topics);
        let names: Vec<&str> = loaded.iter().map(|d| d.topic.as_str()).collect();
        assert_eq!(names, vec!["History", "Physics", "Biology"]);
        assert_eq!(loaded[2].items.len(), 25);
    }

    #[test]
    fn works_through_trait_object() {
        let src = source();
        let dyn_source: &dyn TalkSource = &src;
        let loaded = load_topics(dyn_source, &["Physics".to_string()]);
        assert_eq!(loaded[0].items.len(), 10);
    }
}
