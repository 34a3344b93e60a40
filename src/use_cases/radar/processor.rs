use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::debug;

use super::scanner::FrameHandler;
use crate::domain::{RadarContact, RadarFrame};

/// Splits radar frames into one contact bundle per source entity.
///
/// Delivery never blocks the sweep: when the consumer falls behind, bundles are
/// dropped and counted as undelivered.
#[derive(Debug, Clone, Default)]
pub struct RadarProcessor {
    events: Option<mpsc::Sender<RadarContact>>,
}

impl RadarProcessor {
    pub fn new(events: Option<mpsc::Sender<RadarContact>>) -> Self {
        Self { events }
    }

    /// Fans `frame` out to the contact channel and returns how many bundles were
    /// delivered.
    ///
    /// Contacts without a source are attributed to the frame's emitter, and contacts
    /// without a schema version inherit the frame's. Bundles keep the order in which
    /// their source first appears in the frame.
    pub fn process(&self, frame: &RadarFrame) -> usize {
        let Some(events) = self.events.as_ref() else {
            return 0;
        };

        let mut delivered = 0;
        for bundle in group_by_source(frame) {
            match events.try_send(bundle) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(bundle)) => {
                    debug!(
                        frame_id = frame.frame_id,
                        source = %bundle.source_entity_id,
                        "radar contact channel full; bundle dropped"
                    );
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(frame_id = frame.frame_id, "radar contact channel closed");
                    break;
                }
            }
        }
        delivered
    }

    /// Adapts the processor into a scanner frame handler.
    pub fn frame_handler(self: Arc<Self>) -> FrameHandler {
        Arc::new(move |frame: RadarFrame| {
            self.process(&frame);
        })
    }
}

fn group_by_source(frame: &RadarFrame) -> Vec<RadarContact> {
    let mut bundles: Vec<RadarContact> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for contact in &frame.contacts {
        let source = if contact.source_entity_id.is_empty() {
            frame.emitter_entity_id.as_str()
        } else {
            contact.source_entity_id.as_str()
        };
        if source.is_empty() {
            continue;
        }

        let slot = *index.entry(source).or_insert_with(|| {
            let schema_version = if contact.schema_version.is_empty() {
                frame.schema_version.clone()
            } else {
                contact.schema_version.clone()
            };
            bundles.push(RadarContact {
                schema_version,
                source_entity_id: source.to_string(),
                entries: Vec::new(),
            });
            bundles.len() - 1
        });
        let bundle = &mut bundles[slot];
        if bundle.schema_version.is_empty() {
            bundle.schema_version.clone_from(&contact.schema_version);
        }
        bundle.entries.extend(contact.entries.iter().cloned());
    }

    bundles.retain(|bundle| !bundle.entries.is_empty());
    bundles
}
