use tracing::{debug, trace};

use super::clock::Stopwatch;
use super::config::RecognizerConfig;
use super::error::{BuildError, ConfigError, Result};
use super::match_collector::MatchCollector;
use super::template::{GestureDefinition, Template};
use super::{Match, Point};

pub const NO_MATCH: &str = "No match.";

/// Protractor's optimal cosine distance between two unit vectors of equal length.
/// 0 is a perfect match; the value grows toward PI as the shapes diverge.
pub fn optimal_cosine_distance(v1: &[f64], v2: &[f64]) -> f64 {
    debug_assert_eq!(v1.len(), v2.len());
    let mut a = 0f64;
    let mut b = 0f64;
    for (p, q) in v1.chunks_exact(2).zip(v2.chunks_exact(2)) {
        a += p[0] * q[0] + p[1] * q[1];
        b += p[0] * q[1] - p[1] * q[0];
    }
    let mut angle = (b / a).atan();
    // 0 / 0 when the vectors are orthogonal in every pair
    if angle.is_nan() {
        angle = 0.0;
    }
    let cos = a * angle.cos() + b * angle.sin();
    cos.max(-1.0).min(1.0).acos()
}

/// Single-stroke recognizer over an ordered template library.
/// `C` is an opaque per-template handle handed back with the match.
pub struct Recognizer<C = ()> {
    config: RecognizerConfig,
    templates: Vec<Template<C>>,
}

impl<C> Default for Recognizer<C> {
    fn default() -> Recognizer<C> {
        Recognizer {
            config: RecognizerConfig::default(),
            templates: Vec::new(),
        }
    }
}

impl<C: Clone> Recognizer<C> {
    pub fn new(config: RecognizerConfig) -> std::result::Result<Recognizer<C>, ConfigError> {
        config.validate()?;
        Ok(Recognizer {
            config: config,
            templates: Vec::new(),
        })
    }

    /// Builds a recognizer pre-loaded with `gestures`, in iteration order.
    pub fn with_gestures<I>(config: RecognizerConfig, gestures: I) -> std::result::Result<Recognizer<C>, BuildError>
    where
        I: IntoIterator<Item = GestureDefinition>,
    {
        let mut recognizer = Recognizer::new(config)?;
        for def in gestures {
            recognizer
                .add_gesture(&def.name, &def.points)
                .map_err(|source| BuildError::Gesture { name: def.name.clone(), source: source })?;
        }
        Ok(recognizer)
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    pub fn templates(&self) -> &[Template<C>] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.templates.iter().filter(|t| t.name() == name).count()
    }

    /// Appends a template; returns how many templates now carry `name`.
    pub fn add_gesture(&mut self, name: &str, points: &[Point]) -> Result<usize> {
        self.add_gesture_with(name, points, None)
    }

    pub fn add_gesture_with(&mut self, name: &str, points: &[Point], on_complete: Option<C>) -> Result<usize> {
        let template = Template::new(name, points, on_complete, &self.config)?;
        self.templates.push(template);
        let count = self.count_named(name);
        debug!(gesture = name, count, total = self.templates.len(), "added gesture");
        Ok(count)
    }

    /// Removes every template named `name`; returns the number of templates left.
    pub fn remove_gesture(&mut self, name: &str) -> usize {
        let before = self.templates.len();
        self.templates.retain(|t| t.name() != name);
        debug!(gesture = name, removed = before - self.templates.len(), total = self.templates.len(), "removed gesture");
        self.templates.len()
    }

    /// Best match for `points`. The earliest-inserted template wins exact ties.
    pub fn recognize(&self, points: &[Point]) -> Result<Match<C>> {
        let candidate: Template<C> = Template::new("", points, None, &self.config)?;
        let stopwatch = Stopwatch::start();
        let mut best: Option<&Template<C>> = None;
        let mut best_distance = std::f64::INFINITY;
        for template in &self.templates {
            let d = optimal_cosine_distance(candidate.vector(), template.vector());
            trace!(gesture = template.name(), distance = d, "compared template");
            if d < best_distance {
                best_distance = d;
                best = Some(template);
            }
        }
        let time = stopwatch.elapsed_ms();
        let res = match best {
            Some(template) => Match {
                name: template.name().to_string(),
                score: 1.0 - best_distance,
                time: time,
                on_complete: template.on_complete().cloned(),
            },
            None => Match {
                name: NO_MATCH.to_string(),
                score: 0.0,
                time: time,
                on_complete: None,
            },
        };
        debug!(gesture = %res.name, score = res.score, time_ms = res.time, "recognized stroke");
        Ok(res)
    }

    /// Up to `limit` matches, best first, one per distinct name.
    pub fn recognize_top(&self, points: &[Point], limit: usize) -> Result<Vec<Match<C>>> {
        let candidate: Template<C> = Template::new("", points, None, &self.config)?;
        let stopwatch = Stopwatch::start();
        let mut collector = MatchCollector::new(limit);
        for template in &self.templates {
            let d = optimal_cosine_distance(candidate.vector(), template.vector());
            collector.file_match(Match {
                name: template.name().to_string(),
                score: 1.0 - d,
                time: 0,
                on_complete: template.on_complete().cloned(),
            });
        }
        let time = stopwatch.elapsed_ms();
        let mut res = collector.into_matches();
        for mc in res.iter_mut() {
            mc.time = time;
        }
        debug!(count = res.len(), time_ms = time, "ranked stroke");
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use super::super::config::DegeneratePolicy;
    use super::super::error::StrokeError;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point { x, y }).collect()
    }

    fn triangle() -> Vec<Point> {
        pts(&[(0.0, 100.0), (50.0, 0.0), (100.0, 100.0), (0.0, 100.0)])
    }

    fn caret() -> Vec<Point> {
        pts(&[(0.0, 100.0), (50.0, 0.0), (100.0, 100.0)])
    }

    fn circle() -> Vec<Point> {
        (0..=32)
            .map(|i| {
                let t = i as f64 / 32.0 * 2.0 * std::f64::consts::PI;
                Point { x: 100.0 + 50.0 * t.cos(), y: 100.0 + 50.0 * t.sin() }
            })
            .collect()
    }

    #[test]
    fn test_distance_identical_and_rotated() {
        let config = RecognizerConfig::default();
        let t: Template = Template::new("c", &caret(), None, &config).unwrap();
        assert_abs_diff_eq!(optimal_cosine_distance(t.vector(), t.vector()), 0.0, epsilon = 1e-6);
        // Rotating the candidate vector by any angle costs nothing
        let (sin, cos) = 0.4f64.sin_cos();
        let rotated: Vec<f64> = t
            .vector()
            .chunks_exact(2)
            .flat_map(|p| vec![p[0] * cos - p[1] * sin, p[0] * sin + p[1] * cos])
            .collect();
        assert_abs_diff_eq!(optimal_cosine_distance(t.vector(), &rotated), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_distance_never_nan() {
        let v = vec![1.0, 0.0, 0.0, 0.0];
        let w = vec![0.0, 0.0, 0.0, 1.0];
        let d = optimal_cosine_distance(&v, &w);
        assert!(!d.is_nan());
        assert_abs_diff_eq!(d, std::f64::consts::FRAC_PI_2);
        // Slightly over-unit vectors still clamp into acos' domain
        let u = vec![0.7071067811865477, 0.7071067811865477];
        assert_abs_diff_eq!(optimal_cosine_distance(&u, &u), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_recognizer() {
        let recognizer: Recognizer = Recognizer::default();
        let res = recognizer.recognize(&caret()).unwrap();
        assert_eq!(res.name, NO_MATCH);
        assert_eq!(res.score, 0.0);
        assert_eq!(res.on_complete, None);
        assert!(recognizer.recognize_top(&caret(), 5).unwrap().is_empty());
    }

    #[test]
    fn test_self_match() {
        let mut recognizer: Recognizer<&str> = Recognizer::default();
        recognizer.add_gesture_with("triangle", &triangle(), Some("make-triangle")).unwrap();
        recognizer.add_gesture_with("circle", &circle(), Some("make-circle")).unwrap();
        recognizer.add_gesture("caret", &caret()).unwrap();

        let res = recognizer.recognize(&circle()).unwrap();
        assert_eq!(res.name, "circle");
        assert_eq!(res.on_complete, Some("make-circle"));
        assert_abs_diff_eq!(res.score, 1.0, epsilon = 1e-6);

        let ranked = recognizer.recognize_top(&caret(), 3).unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].name, "caret");
        assert!(ranked[0].score > ranked[1].score);
        assert!(ranked[1].score >= ranked[2].score);
    }

    #[test]
    fn test_tie_break_first_inserted() {
        let mut recognizer: Recognizer = Recognizer::default();
        recognizer.add_gesture("first", &caret()).unwrap();
        recognizer.add_gesture("second", &caret()).unwrap();
        assert_eq!(recognizer.recognize(&caret()).unwrap().name, "first");
        let ranked = recognizer.recognize_top(&caret(), 2).unwrap();
        assert_eq!(ranked[0].name, "first");
        assert_eq!(ranked[1].name, "second");
    }

    #[test]
    fn test_add_counts_and_remove() {
        let mut recognizer: Recognizer = Recognizer::default();
        assert_eq!(recognizer.add_gesture("caret", &caret()).unwrap(), 1);
        assert_eq!(recognizer.add_gesture("circle", &circle()).unwrap(), 1);
        assert_eq!(recognizer.add_gesture("caret", &triangle()).unwrap(), 2);
        assert_eq!(recognizer.len(), 3);

        assert_eq!(recognizer.remove_gesture("caret"), 1);
        assert_eq!(recognizer.count_named("caret"), 0);
        assert_ne!(recognizer.recognize(&caret()).unwrap().name, "caret");
        assert_eq!(recognizer.remove_gesture("missing"), 1);
        assert_eq!(recognizer.remove_gesture("circle"), 0);
        assert!(recognizer.is_empty());
        assert_eq!(recognizer.recognize(&caret()).unwrap().name, NO_MATCH);
    }

    #[test]
    fn test_ranked_keeps_best_per_name() {
        let mut recognizer: Recognizer = Recognizer::default();
        recognizer.add_gesture("shape", &triangle()).unwrap();
        recognizer.add_gesture("shape", &caret()).unwrap();
        recognizer.add_gesture("circle", &circle()).unwrap();
        let ranked = recognizer.recognize_top(&caret(), 10).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "shape");
        assert_abs_diff_eq!(ranked[0].score, 1.0, epsilon = 1e-6);
        assert!(recognizer.recognize_top(&caret(), 0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_query() {
        let mut recognizer: Recognizer = Recognizer::default();
        recognizer.add_gesture("caret", &caret()).unwrap();
        assert_eq!(recognizer.recognize(&pts(&[(1.0, 1.0)])).unwrap_err(), StrokeError::TooFewPoints { count: 1 });
        assert_eq!(recognizer.recognize(&pts(&[(1.0, 1.0), (1.0, 1.0)])).unwrap_err(), StrokeError::ZeroLength);
        assert!(recognizer.add_gesture("bad", &[]).is_err());
        assert_eq!(recognizer.len(), 1);
    }

    #[test]
    fn test_reject_policy() {
        let mut config = RecognizerConfig::default();
        config.degenerate = DegeneratePolicy::Reject;
        let mut recognizer: Recognizer = Recognizer::new(config).unwrap();
        let res = recognizer.add_gesture("flat", &pts(&[(0.0, 0.0), (100.0, 0.0)]));
        match res {
            Err(StrokeError::DegenerateBoundingBox { .. }) => {}
            other => panic!("expected degenerate bounding box, got {:?}", other),
        }
    }

    #[test]
    fn test_with_gestures() {
        let defs = vec![
            GestureDefinition { name: "caret".to_string(), points: caret() },
            GestureDefinition { name: "circle".to_string(), points: circle() },
        ];
        let recognizer: Recognizer = Recognizer::with_gestures(RecognizerConfig::default(), defs).unwrap();
        assert_eq!(recognizer.len(), 2);
        assert_eq!(recognizer.templates()[0].name(), "caret");

        let bad = vec![GestureDefinition { name: "dot".to_string(), points: pts(&[(3.0, 3.0)]) }];
        match Recognizer::<()>::with_gestures(RecognizerConfig::default(), bad) {
            Err(BuildError::Gesture { name, .. }) => assert_eq!(name, "dot"),
            _ => panic!("expected gesture error"),
        }

        let mut config = RecognizerConfig::default();
        config.num_points = 0;
        assert!(Recognizer::<()>::new(config).is_err());
    }
}
