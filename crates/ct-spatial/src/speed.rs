//! Edge speed imputation and `maxspeed` tag parsing.
//!
//! Resolution order for one road segment:
//!
//! 1. its own parsed `maxspeed` tag;
//! 2. an explicit per-class override (residential 35, secondary 50,
//!    tertiary 60 km/h for commute runs);
//! 3. the mean observed `maxspeed` of its `highway` class;
//! 4. the mean of every observed `maxspeed`;
//! 5. a static class default.
//!
//! Speeds are km/h throughout; [`travel_ms`] converts to edge cost.

use rustc_hash::FxHashMap;

const MPH_TO_KPH: f64 = 1.609_344;

/// Imputed car speeds keyed by OSM `highway` class.
#[derive(Debug, Clone, Default)]
pub struct SpeedTable {
    overrides:   FxHashMap<String, f64>,
    class_means: FxHashMap<String, f64>,
    global_mean: Option<f64>,
}

impl SpeedTable {
    /// Table with no overrides; every class falls through to observations
    /// and then to [`default_kph`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides used for commute trip generation.
    pub fn commute_defaults() -> Self {
        Self::new()
            .with_override("residential", 35.0)
            .with_override("secondary", 50.0)
            .with_override("tertiary", 60.0)
    }

    pub fn with_override(mut self, class: &str, kph: f64) -> Self {
        self.overrides.insert(class.to_owned(), kph);
        self
    }

    /// Record observed `(class, maxspeed_kph)` pairs.  Replaces any previous
    /// observations.
    pub fn observe<'a, I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut sums: FxHashMap<&str, (f64, u32)> = FxHashMap::default();
        let (mut total, mut count) = (0.0, 0u32);
        for (class, kph) in samples {
            if !(kph.is_finite() && kph > 0.0) {
                continue;
            }
            let slot = sums.entry(class).or_insert((0.0, 0));
            slot.0 += kph;
            slot.1 += 1;
            total += kph;
            count += 1;
        }
        self.class_means = sums
            .into_iter()
            .map(|(class, (sum, n))| (class.to_owned(), sum / n as f64))
            .collect();
        self.global_mean = (count > 0).then(|| total / count as f64);
    }

    /// Speed to use for a segment of `class` whose own tag parsed to
    /// `maxspeed_kph`.
    pub fn speed_kph(&self, class: &str, maxspeed_kph: Option<f64>) -> f64 {
        if let Some(kph) = maxspeed_kph.filter(|v| v.is_finite() && *v > 0.0) {
            return kph;
        }
        if let Some(&kph) = self.overrides.get(class) {
            return kph;
        }
        if let Some(&kph) = self.class_means.get(class) {
            return kph;
        }
        self.global_mean.unwrap_or_else(|| default_kph(class))
    }
}

/// Static fallback speed for a drivable class.
pub fn default_kph(class: &str) -> f64 {
    match class {
        "motorway" | "motorway_link"     => 100.0,
        "trunk" | "trunk_link"           => 80.0,
        "primary" | "primary_link"       => 60.0,
        "secondary" | "secondary_link"   => 50.0,
        "tertiary" | "tertiary_link"     => 40.0,
        "residential" | "living_street"  => 30.0,
        "service" | "unclassified"       => 25.0,
        _                                => 30.0,
    }
}

/// `true` for `highway` values a car may drive on.
pub fn is_drivable(class: &str) -> bool {
    !matches!(
        class,
        "footway" | "path" | "cycleway" | "pedestrian" | "steps" | "track"
            | "bridleway" | "corridor" | "proposed" | "construction" | "platform"
    )
}

/// Parse an OSM `maxspeed` value into km/h.
///
/// Accepts `"50"`, `"30 mph"`, `"30mph"` and `;`-separated lists (averaged).
/// Symbolic values such as `"none"` or `"walk"` yield `None`.
pub fn parse_maxspeed(raw: &str) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0u32;
    for part in raw.split(';') {
        let part = part.trim();
        let (num, mph) = match part.strip_suffix("mph") {
            Some(rest) => (rest.trim(), true),
            None => (part.strip_suffix("km/h").unwrap_or(part).trim(), false),
        };
        let Ok(v) = num.parse::<f64>() else { continue };
        if !(v.is_finite() && v > 0.0) {
            continue;
        }
        sum += if mph { v * MPH_TO_KPH } else { v };
        n += 1;
    }
    (n > 0).then(|| sum / n as f64)
}

/// Edge travel time in whole milliseconds for `length_m` at `kph`.
#[inline]
pub fn travel_ms(length_m: f32, kph: f64) -> u32 {
    let mps = kph / 3.6;
    (length_m as f64 / mps * 1_000.0).round() as u32
}
