use super::angle_distance::*;
use super::config::MatcherConfig;
use super::direction_encoder::DirectionEncoder;
use super::entities::*;
use super::error::{LengthMismatchError, RegistryError};
use super::match_collector::*;
use super::templates::TemplateRegistry;
use super::*;

/// Sum of per-stroke edit distances between an input and a template.
///
/// Strokes are paired by index, so both sides must have the same stroke count.
pub fn multi_stroke_cost(input: &[DirectionSequence], template: &[DirectionSequence]) -> Result<f32, LengthMismatchError> {
    if input.len() != template.len() {
        return Err(LengthMismatchError {
            input: input.len(),
            template: template.len(),
        });
    }
    let cost = input
        .iter()
        .zip(template)
        .map(|(i, t)| compute_edit_distance_matrix(i, t).final_cost())
        .sum();
    Ok(cost)
}

/// Ranks registered templates against drawn strokes.
pub struct Matcher {
    registry: TemplateRegistry,
    config: MatcherConfig,
}

impl Matcher {
    pub fn new(registry: TemplateRegistry, config: MatcherConfig) -> Matcher {
        Matcher {
            registry: registry,
            config: config,
        }
    }

    pub fn with_builtin_templates() -> Result<Matcher, RegistryError> {
        Ok(Matcher::new(TemplateRegistry::builtin()?, MatcherConfig::default()))
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn encode(&self, strokes: &[Stroke]) -> Vec<DirectionSequence> {
        let encoder = self.config.encoding.encoder();
        strokes.iter().map(|s| encoder.encode(s)).collect()
    }

    // Best match within the threshold, or None
    pub fn recognize(&self, strokes: &[Stroke]) -> Option<MatchResult<'_>> {
        self.recognize_sequences(&self.encode(strokes))
    }

    pub fn recognize_sequences(&self, input: &[DirectionSequence]) -> Option<MatchResult<'_>> {
        self.lookup_sequences(input, 1).into_iter().next()
    }

    // Up to `limit` matches within the threshold, cheapest first
    pub fn lookup(&self, strokes: &[Stroke], limit: usize) -> Vec<MatchResult<'_>> {
        self.lookup_sequences(&self.encode(strokes), limit)
    }

    pub fn lookup_sequences(&self, input: &[DirectionSequence], limit: usize) -> Vec<MatchResult<'_>> {
        if limit == 0 {
            return Vec::new();
        }
        let mut collector = MatchCollector::new(limit);
        for candidate in self.score(input) {
            if candidate.cost <= self.config.threshold {
                collector.file_match(candidate);
            }
        }
        if collector.is_empty() {
            tracing::debug!(strokes = input.len(), threshold = self.config.threshold, "no match");
        }
        collector.into_matches()
    }

    // Every template with the input's stroke count, cheapest first, threshold not applied
    pub fn rank(&self, strokes: &[Stroke]) -> Vec<MatchResult<'_>> {
        self.rank_sequences(&self.encode(strokes))
    }

    pub fn rank_sequences(&self, input: &[DirectionSequence]) -> Vec<MatchResult<'_>> {
        let mut ranked = self.score(input);
        // Stable sort keeps registry order between equal costs
        ranked.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        ranked
    }

    // Costs of all stroke-count compatible templates, in registry order
    fn score(&self, input: &[DirectionSequence]) -> Vec<MatchResult<'_>> {
        let mut res: Vec<MatchResult> = Vec::new();
        for template in self.registry.with_stroke_count(input.len()) {
            match multi_stroke_cost(input, template.strokes()) {
                Ok(cost) => {
                    tracing::debug!(name = template.name(), cost = cost, "candidate");
                    res.push(MatchResult {
                        template: template,
                        cost: cost,
                    });
                }
                Err(err) => {
                    tracing::error!(name = template.name(), error = %err, "stroke count filter let through a mismatched template");
                }
            }
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction_encoder::Encoding;

    fn stroke(points: &[(f32, f32)]) -> Stroke {
        Stroke {
            points: points.iter().map(|&(x, y)| Point { x: x, y: y }).collect(),
        }
    }

    // Two diagonals: down-right, then down-left
    fn drawn_x() -> Vec<Stroke> {
        vec![
            stroke(&[(0.0, 0.0), (10.0, 10.0), (20.0, 20.0)]),
            stroke(&[(20.0, 0.0), (10.0, 10.0), (0.0, 20.0)]),
        ]
    }

    fn builtin() -> Matcher {
        Matcher::with_builtin_templates().unwrap()
    }

    #[test]
    fn test_multi_stroke_cost() {
        let input = vec![vec![135.0, 135.0], vec![225.0]];
        let template = vec![vec![135.0, 135.0], vec![270.0]];
        assert_eq!(multi_stroke_cost(&input, &template), Ok(45.0));
        assert_eq!(
            multi_stroke_cost(&input, &template[..1]),
            Err(LengthMismatchError { input: 2, template: 1 })
        );
    }

    #[test]
    fn test_recognize_x() {
        let matcher = builtin();
        let best = matcher.recognize(&drawn_x()).unwrap();
        assert_eq!(best.template.name(), "X-1");
        assert_eq!(best.cost, 0.0);
    }

    #[test]
    fn test_recognize_with_compass_encoding() {
        let registry = TemplateRegistry::builtin().unwrap();
        let matcher = Matcher::new(registry, MatcherConfig::default().with_encoding(Encoding::Compass));
        // Slightly off diagonals snap to the compass headings
        let strokes = vec![
            stroke(&[(0.0, 0.0), (10.0, 11.0), (20.0, 21.0)]),
            stroke(&[(20.0, 0.0), (11.0, 10.0), (0.0, 21.0)]),
        ];
        let best = matcher.recognize(&strokes).unwrap();
        assert_eq!(best.template.name(), "X-1");
        assert_eq!(best.cost, 0.0);
    }

    #[test]
    fn test_only_matching_stroke_counts_are_scored() {
        let matcher = builtin();
        let ranked = matcher.rank(&drawn_x());
        let names: Vec<&str> = ranked.iter().map(|m| m.template.name()).collect();
        assert_eq!(names.len(), 3);
        assert!(ranked.iter().all(|m| m.template.stroke_count() == 2));
        assert_eq!(names[0], "X-1");
        // Costs ascend
        assert!(ranked.windows(2).all(|w| w[0].cost <= w[1].cost));
    }

    #[test]
    fn test_no_candidate() {
        let matcher = builtin();
        let strokes = vec![
            stroke(&[(0.0, 0.0), (0.0, 10.0)]),
            stroke(&[(0.0, 0.0), (0.0, 10.0)]),
            stroke(&[(0.0, 0.0), (0.0, 10.0)]),
            stroke(&[(0.0, 0.0), (0.0, 10.0)]),
        ];
        assert!(matcher.rank(&strokes).is_empty());
        assert!(matcher.recognize(&strokes).is_none());
        assert!(matcher.recognize(&[]).is_none());
    }

    #[test]
    fn test_threshold() {
        let template = CharacterTemplate::parse("I", "8").unwrap();
        let input = vec![vec![180.0, 180.0, 0.0]];
        // Cost: one carried heading, one repeat, and a full reversal
        let cost = multi_stroke_cost(&input, template.strokes()).unwrap();
        assert!(cost > 0.0);

        let registry = TemplateRegistry::new(vec![template.clone()]);
        let matcher = Matcher::new(registry.clone(), MatcherConfig::default().with_threshold(cost));
        assert_eq!(matcher.recognize_sequences(&input).map(|m| m.cost), Some(cost));

        let matcher = Matcher::new(registry, MatcherConfig::default().with_threshold(cost - 1.0));
        assert!(matcher.recognize_sequences(&input).is_none());
        // Ranking ignores the threshold
        assert_eq!(matcher.rank_sequences(&input).len(), 1);
    }

    #[test]
    fn test_default_threshold_rejects_far_input() {
        let matcher = builtin();
        // Long stroke going straight up: far from every one-stroke template
        let points: Vec<(f32, f32)> = (0..21).map(|i| (0.0, 200.0 - (i as f32) * 8.0)).collect();
        let strokes = vec![stroke(&points)];
        let ranked = matcher.rank(&strokes);
        assert!(ranked[0].cost > 1200.0);
        assert!(matcher.recognize(&strokes).is_none());
    }

    #[test]
    fn test_ties_keep_registry_order() {
        let registry = TemplateRegistry::new(vec![
            CharacterTemplate::parse("first", "4").unwrap(),
            CharacterTemplate::parse("second", "4").unwrap(),
        ]);
        let matcher = Matcher::new(registry, MatcherConfig::default());
        let input = vec![vec![90.0]];
        assert_eq!(matcher.recognize_sequences(&input).map(|m| m.template.name()), Some("first"));
        let names: Vec<&str> = matcher.rank_sequences(&input).iter().map(|m| m.template.name()).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn test_lookup_limit() {
        let matcher = Matcher::new(
            TemplateRegistry::builtin().unwrap(),
            MatcherConfig::default().with_threshold(f32::MAX),
        );
        assert!(matcher.lookup(&drawn_x(), 0).is_empty());
        let top = matcher.lookup(&drawn_x(), 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].template.name(), "X-1");
        assert_eq!(matcher.lookup(&drawn_x(), 10).len(), 3);
        let all = matcher.lookup(&drawn_x(), usize::MAX);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].template.name(), "X-1");
    }

    #[test]
    fn test_deterministic() {
        let matcher = builtin();
        let first = matcher.recognize(&drawn_x());
        for _ in 0..10 {
            assert_eq!(matcher.recognize(&drawn_x()), first);
        }
        let far = vec![stroke(&[(0.0, 0.0), (0.0, -50.0)])];
        let first = matcher.recognize(&far);
        for _ in 0..10 {
            assert_eq!(matcher.recognize(&far), first);
        }
    }
}
