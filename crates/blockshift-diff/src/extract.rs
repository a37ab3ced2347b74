//! The Transition Feature Extractor.
//!
//! [`FeatureExtractor`] runs the presence check over the full identifier
//! sets, then each of the four [`BlockDetector`]s over every identifier common
//! to both snapshots, and assembles one [`FeatureRecord`].

use tracing::debug;

use blockshift_tree::Snapshot;

use crate::config::ExtractConfig;
use crate::detectors::{
    BlockDetector, BlockPair, ContextMoveDetector, FieldChangeDetector, SpatialMoveDetector,
    StructuralChangeDetector,
};
use crate::error::DiffResult;
use crate::features::FeatureRecord;
use crate::presence::{common_block_ids, detect_presence};

/// One step in a project's history: an ordered pair of snapshots.
///
/// A transition borrows its snapshots and never mutates them.
#[derive(Clone, Copy, Debug)]
pub struct Transition<'a> {
    prev: &'a Snapshot,
    cur: &'a Snapshot,
}

impl<'a> Transition<'a> {
    pub fn new(prev: &'a Snapshot, cur: &'a Snapshot) -> Self {
        Self { prev, cur }
    }

    pub fn prev(&self) -> &'a Snapshot {
        self.prev
    }

    pub fn cur(&self) -> &'a Snapshot {
        self.cur
    }
}

/// The pipeline of per-block detectors, one per feature list.
pub struct FeatureExtractor {
    detectors: Vec<Box<dyn BlockDetector>>,
    config: ExtractConfig,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(ExtractConfig::default())
    }
}

impl std::fmt::Debug for FeatureExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let features: Vec<_> = self.detectors.iter().map(|d| d.feature()).collect();
        f.debug_struct("FeatureExtractor")
            .field("detectors", &features)
            .field("config", &self.config)
            .finish()
    }
}

impl FeatureExtractor {
    /// Build the standard pipeline: field, spatial, context and structural
    /// detectors, in that order.
    pub fn new(config: ExtractConfig) -> Self {
        let detectors: Vec<Box<dyn BlockDetector>> = vec![
            Box::new(FieldChangeDetector::new(config.field_length_policy)),
            Box::new(SpatialMoveDetector),
            Box::new(ContextMoveDetector),
            Box::new(StructuralChangeDetector),
        ];
        Self { detectors, config }
    }

    /// Install `detector`, replacing the one that fills the same feature
    /// list. Each list has at most one detector, so no identifier is listed
    /// twice.
    pub fn add_detector(&mut self, detector: Box<dyn BlockDetector>) {
        let feature = detector.feature();
        match self.detectors.iter().position(|d| d.feature() == feature) {
            Some(slot) => self.detectors[slot] = detector,
            None => self.detectors.push(detector),
        }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }

    /// Extract the feature record of one transition.
    ///
    /// Detectors never short-circuit each other. Any detector error aborts
    /// the whole transition.
    pub fn extract(&self, transition: &Transition<'_>) -> DiffResult<FeatureRecord> {
        let (prev, cur) = (transition.prev(), transition.cur());
        let presence = detect_presence(prev, cur);
        let mut record = FeatureRecord {
            added: presence.added,
            deleted: presence.deleted,
            ..FeatureRecord::default()
        };

        let common = common_block_ids(prev, cur);
        for id in &common {
            let pair = BlockPair::resolve(id, prev, cur)?;
            for detector in &self.detectors {
                if detector.detect(&pair)? {
                    record.list_mut(detector.feature()).push((*id).clone());
                }
            }
        }

        debug!(
            common = common.len(),
            added = record.added.len(),
            deleted = record.deleted.len(),
            moved_in_space = record.moved_in_space.len(),
            moved_in_context = record.moved_in_context.len(),
            fields_changed = record.fields_changed.len(),
            changed = record.changed.len(),
            "transition extracted"
        );
        Ok(record)
    }

    /// Extract one record per adjacent pair of `snapshots`, oldest first.
    pub fn extract_history(&self, snapshots: &[Snapshot]) -> DiffResult<Vec<FeatureRecord>> {
        snapshots
            .windows(2)
            .map(|pair| self.extract(&Transition::new(&pair[0], &pair[1])))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldLengthPolicy;
    use crate::detectors::BlockPair;
    use crate::error::DiffError;
    use blockshift_types::{BlockId, Feature};
    use proptest::prelude::*;

    fn snap(xml: &str) -> Snapshot {
        Snapshot::from_xml(xml).unwrap()
    }

    fn extract(prev: &str, cur: &str) -> FeatureRecord {
        let (prev, cur) = (snap(prev), snap(cur));
        FeatureExtractor::default()
            .extract(&Transition::new(&prev, &cur))
            .unwrap()
    }

    fn ids(list: &[BlockId]) -> Vec<&str> {
        list.iter().map(BlockId::as_str).collect()
    }

    const PROGRAM: &str = r#"<xml xmlns="http://www.w3.org/1999/xhtml">
  <block type="component_event" id="1" x="10" y="20">
    <mutation component_type="Button" instance_name="Button1" event_name="Click"/>
    <field name="COMPONENT_SELECTOR">Button1</field>
    <statement name="DO">
      <block type="text_to_speech" id="2">
        <value name="ARG0">
          <block type="text" id="30">
            <field name="TEXT">hello</field>
          </block>
        </value>
        <next>
          <block type="set_text" id="4"/>
        </next>
      </block>
    </statement>
  </block>
  <block type="text" id="6" x="200" y="20">
    <field name="TEXT">spare</field>
  </block>
</xml>"#;

    #[test]
    fn default_pipeline_has_four_detectors() {
        let extractor = FeatureExtractor::default();
        assert_eq!(extractor.detector_count(), 4);
        assert_eq!(
            extractor.config().field_length_policy,
            FieldLengthPolicy::Ignore
        );
    }

    #[test]
    fn each_feature_has_one_detector() {
        let features: Vec<_> = FeatureExtractor::default()
            .detectors
            .iter()
            .map(|d| d.feature())
            .collect();
        assert_eq!(
            features,
            vec![
                Feature::FieldsChanged,
                Feature::MovedInSpace,
                Feature::MovedInContext,
                Feature::Changed
            ]
        );
    }

    #[test]
    fn replacing_a_detector_never_lists_an_id_twice() {
        let mut extractor = FeatureExtractor::default();
        extractor.add_detector(Box::new(StructuralChangeDetector));
        extractor.add_detector(Box::new(StructuralChangeDetector));
        assert_eq!(extractor.detector_count(), 4);

        let a = r#"<xml><block type="a" id="1" x="0" y="0"/></xml>"#;
        let b = r#"<xml><block type="b" id="1" x="0" y="0"/></xml>"#;
        let (sa, sb) = (snap(a), snap(b));
        let record = extractor.extract(&Transition::new(&sa, &sb)).unwrap();
        assert_eq!(ids(&record.changed), vec!["1"]);
        assert!(record.fields_changed.is_empty());
        assert!(record.moved_in_context.is_empty());
    }

    #[test]
    fn self_transition_is_empty() {
        let record = extract(PROGRAM, PROGRAM);
        assert!(record.is_empty());
        assert_eq!(record, FeatureRecord::default());
    }

    #[test]
    fn added_and_deleted_blocks() {
        let a = r#"<xml><block id="1" x="0" y="0"/><block id="2" x="0" y="9"/><block id="3" x="0" y="18"/></xml>"#;
        let b = r#"<xml><block id="2" x="0" y="9"/><block id="3" x="0" y="18"/><block id="4" x="0" y="27"/></xml>"#;
        let record = extract(a, b);
        assert_eq!(ids(&record.deleted), vec!["1"]);
        assert_eq!(ids(&record.added), vec!["4"]);
        assert!(record.moved_in_space.is_empty());
        assert!(record.moved_in_context.is_empty());
        assert!(record.changed.is_empty());
        assert!(record.fields_changed.is_empty());
    }

    #[test]
    fn pure_coordinate_move_is_only_spatial() {
        let moved = PROGRAM.replace(r#"x="200" y="20""#, r#"x="200" y="99""#);
        let record = extract(PROGRAM, &moved);
        assert_eq!(ids(&record.moved_in_space), vec!["6"]);
        assert_eq!(record.flagged().collect::<Vec<_>>(), vec![Feature::MovedInSpace]);
    }

    #[test]
    fn field_edit_is_only_a_field_change() {
        let edited = PROGRAM.replace(">hello<", ">world<");
        let record = extract(PROGRAM, &edited);
        assert_eq!(ids(&record.fields_changed), vec!["30"]);
        assert_eq!(record.flagged().collect::<Vec<_>>(), vec![Feature::FieldsChanged]);
    }

    #[test]
    fn nesting_a_top_level_block_is_a_context_move() {
        let a = r#"<xml>
  <block type="say" id="3" x="0" y="0"><value name="ARG0"/></block>
  <block type="text" id="6" x="10" y="20"><field name="TEXT">hi</field></block>
</xml>"#;
        let b = r#"<xml>
  <block type="say" id="3" x="0" y="0"><value name="ARG0"><block type="text" id="6"><field name="TEXT">hi</field></block></value></block>
</xml>"#;
        let record = extract(a, b);
        assert_eq!(ids(&record.moved_in_context), vec!["6"]);
        assert!(!record.contains(Feature::MovedInSpace, "6"));
        assert!(!record.contains(Feature::Changed, "6"));
        assert!(!record.contains(Feature::FieldsChanged, "6"));
        // The socket wrapper on 3 is unchanged: same tag and attributes.
        assert!(!record.contains(Feature::Changed, "3"));
    }

    #[test]
    fn replugging_into_another_block_is_only_a_context_move() {
        let a = r#"<xml><block type="say" id="1" x="0" y="0"><value name="ARG0"><block type="text" id="6"/></value></block><block type="say" id="2" x="0" y="50"><value name="ARG0"/></block></xml>"#;
        let b = r#"<xml><block type="say" id="1" x="0" y="0"><value name="ARG0"/></block><block type="say" id="2" x="0" y="50"><value name="ARG0"><block type="text" id="6"/></value></block></xml>"#;
        let record = extract(a, b);
        assert_eq!(ids(&record.moved_in_context), vec!["6"]);
        assert!(record.moved_in_space.is_empty());
        assert!(record.changed.is_empty());
    }

    #[test]
    fn one_block_can_land_in_several_lists() {
        let a = r#"<xml><block type="text" id="5" x="0" y="0"><field name="TEXT">a</field></block></xml>"#;
        let b = r#"<xml><block type="text" id="5" x="3" y="3" collapsed="true"><field name="TEXT">b</field></block></xml>"#;
        let record = extract(a, b);
        assert_eq!(
            record.flagged().collect::<Vec<_>>(),
            vec![Feature::MovedInSpace, Feature::FieldsChanged, Feature::Changed]
        );
    }

    #[test]
    fn gaining_a_field_falls_through_by_default() {
        let a = r#"<xml><block type="t" id="5" x="0" y="0"><field name="A">a</field></block></xml>"#;
        let b = r#"<xml><block type="t" id="5" x="0" y="0"><field name="A">a</field><field name="B">b</field></block></xml>"#;
        assert!(extract(a, b).is_empty());

        let flagging = FeatureExtractor::new(ExtractConfig {
            field_length_policy: FieldLengthPolicy::Flag,
        });
        let (sa, sb) = (snap(a), snap(b));
        let record = flagging.extract(&Transition::new(&sa, &sb)).unwrap();
        assert_eq!(ids(&record.fields_changed), vec!["5"]);
    }

    struct Mismatching;

    impl BlockDetector for Mismatching {
        fn feature(&self) -> Feature {
            Feature::Changed
        }

        fn detect(&self, pair: &BlockPair<'_>) -> DiffResult<bool> {
            // Compare against the wrong block to trip the identity check.
            let other = pair
                .cur
                .block_ids()
                .find(|id| *id != pair.id)
                .and_then(|id| pair.cur.block(id.as_str()))
                .unwrap_or(pair.cur_block);
            crate::equality::blocks_equal(pair.prev_block, other)
        }
    }

    #[test]
    fn detector_error_aborts_the_transition() {
        let mut extractor = FeatureExtractor::default();
        extractor.add_detector(Box::new(Mismatching));
        assert_eq!(extractor.detector_count(), 4);
        let (a, b) = (snap(PROGRAM), snap(PROGRAM));
        let err = extractor.extract(&Transition::new(&a, &b)).unwrap_err();
        assert!(matches!(err, DiffError::IdentityMismatch { .. }));
    }

    #[test]
    fn history_yields_one_record_per_transition() {
        let v1 = snap(r#"<xml><block id="1" x="0" y="0"/></xml>"#);
        let v2 = snap(r#"<xml><block id="1" x="0" y="0"/><block id="2" x="0" y="9"/></xml>"#);
        let v3 = snap(r#"<xml><block id="2" x="0" y="9"/></xml>"#);
        let records = FeatureExtractor::default()
            .extract_history(&[v1, v2, v3])
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(ids(&records[0].added), vec!["2"]);
        assert_eq!(ids(&records[1].deleted), vec!["1"]);
    }

    #[test]
    fn history_of_one_snapshot_is_empty() {
        let v1 = snap(r#"<xml><block id="1" x="0" y="0"/></xml>"#);
        assert!(FeatureExtractor::default().extract_history(&[v1]).unwrap().is_empty());
    }

    fn program() -> impl Strategy<Value = String> {
        let leaf = ("[a-z]{1,6}", "[a-z ]{0,6}").prop_map(|(kind, text)| {
            format!(r#"<block type="{kind}"><field name="TEXT">{text}</field></block>"#)
        });
        proptest::collection::vec((leaf, 0u8..3, 0u16..500, 0u16..500), 0..6).prop_map(|items| {
            let mut counter = 0;
            let mut next_id = || {
                counter += 1;
                counter.to_string()
            };
            let mut body = String::new();
            for (leaf, depth, x, y) in items {
                let inner = leaf.replacen("<block ", &format!(r#"<block id="{}" "#, next_id()), 1);
                let wrapped = (0..depth).fold(inner, |acc, _| {
                    format!(r#"<block type="wrap" id="{}"><value name="V">{acc}</value></block>"#, next_id())
                });
                body.push_str(&wrapped.replacen("<block ", &format!(r#"<block x="{x}" y="{y}" "#), 1));
            }
            format!("<xml>{body}</xml>")
        })
    }

    proptest! {
        #[test]
        fn comparing_a_snapshot_with_itself_is_empty(xml in program()) {
            let s = snap(&xml);
            let record = FeatureExtractor::default().extract(&Transition::new(&s, &s)).unwrap();
            prop_assert!(record.is_empty());
        }
    }
}
