//! Animation profile (physics and transition tuning)
//!
//! Persisted in LocalStorage so a page can pin a feel without a rebuild.

use serde::{Deserialize, Serialize};

use crate::error::OrbError;

/// Named tuning presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProfilePreset {
    /// Slow, drifting orbs
    #[default]
    Calm,
    /// Larger step and speed cap
    Lively,
}

impl ProfilePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfilePreset::Calm => "calm",
            ProfilePreset::Lively => "lively",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "calm" | "default" => Some(ProfilePreset::Calm),
            "lively" | "fast" => Some(ProfilePreset::Lively),
            _ => None,
        }
    }
}

/// Gravity and integrator constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsProfile {
    /// Gravitational constant
    pub g: f32,
    /// Mass of every body
    pub mass: f32,
    /// Softening length (px) added in quadrature to pair distance
    pub softening: f32,
    /// Per-step velocity damping (just under 1)
    pub damping: f32,
    /// Boundary spring constant (acceleration per px of penetration)
    pub boundary_force: f32,
    /// Distance from each edge where the boundary spring engages (px)
    pub boundary_margin: f32,
    /// Simulated time per step
    pub dt: f32,
    /// Speed cap (px per simulated time unit)
    pub max_speed: f32,
    /// Spawn triangle radius as a fraction of min(width, height)
    pub spawn_radius_frac: f32,
    /// Fraction of the circular-orbit speed used at spawn
    pub orbital_speed_factor: f32,
    /// Velocity jitter as a fraction of orbital speed
    pub jitter_frac: f32,
    /// Physics steps per wall-clock second
    pub steps_per_second: f32,
}

impl Default for PhysicsProfile {
    fn default() -> Self {
        Self {
            g: 500.0,
            mass: 1.0,
            softening: 120.0,
            damping: 0.9999,
            boundary_force: 0.3,
            boundary_margin: 80.0,
            dt: 0.5,
            max_speed: 3.5,
            spawn_radius_frac: 0.22,
            orbital_speed_factor: 0.85,
            jitter_frac: 0.15,
            steps_per_second: 60.0,
        }
    }
}

impl PhysicsProfile {
    /// Wall-clock duration of one physics step (ms)
    pub fn step_ms(&self) -> f64 {
        1000.0 / self.steps_per_second as f64
    }
}

/// Scripted transition timing and curves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionProfile {
    /// Condense duration for the orb nearest the center (ms)
    pub condense_base_ms: f64,
    /// Extra condense time for the farthest orb (ms)
    pub condense_extra_ms: f64,
    pub expand_ms: f64,
    pub disperse_ms: f64,
    pub reconverge_ms: f64,
    /// Scale of a fully condensed orb
    pub min_scale: f32,
    /// How far past its snapshot an orb flies when dispersing
    pub overshoot: f32,
    /// Scale at the end of dispersal
    pub disperse_peak_scale: f32,
    /// Condense progress at which orbs are fully transparent
    pub condense_fade_end: f32,
    /// Expand progress at which orbs are fully opaque
    pub expand_fade_end: f32,
    /// Dispersal progress at which opacity peaks
    pub disperse_flash_end: f32,
    /// Peak opacity while dispersing
    pub disperse_flash_opacity: f32,
    /// Delay before orbs jump above the modal backdrop (ms)
    pub elevate_delay_ms: f64,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            condense_base_ms: 400.0,
            condense_extra_ms: 300.0,
            expand_ms: 500.0,
            disperse_ms: 700.0,
            reconverge_ms: 600.0,
            min_scale: 0.08,
            overshoot: 1.8,
            disperse_peak_scale: 1.3,
            condense_fade_end: 0.85,
            expand_fade_end: 0.4,
            disperse_flash_end: 0.2,
            disperse_flash_opacity: 0.5,
            elevate_delay_ms: 100.0,
        }
    }
}

impl MotionProfile {
    /// Longest possible condense duration (farthest orb)
    pub fn max_condense_ms(&self) -> f64 {
        self.condense_base_ms + self.condense_extra_ms
    }
}

/// Complete tuning for one animator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AnimationProfile {
    pub preset: ProfilePreset,
    pub physics: PhysicsProfile,
    #[serde(default)]
    pub motion: MotionProfile,
}

impl AnimationProfile {
    /// Create a profile from a preset (applies preset defaults)
    pub fn from_preset(preset: ProfilePreset) -> Self {
        let mut profile = Self::default();
        profile.apply_preset(preset);
        profile
    }

    /// Apply a preset (updates preset-dependent physics)
    pub fn apply_preset(&mut self, preset: ProfilePreset) {
        self.preset = preset;
        match preset {
            ProfilePreset::Calm => {
                self.physics.dt = 0.5;
                self.physics.max_speed = 3.5;
            }
            ProfilePreset::Lively => {
                self.physics.dt = 0.7;
                self.physics.max_speed = 5.0;
            }
        }
    }

    /// Decode and validate a profile from JSON
    pub fn from_json(json: &str) -> Result<Self, OrbError> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Reject values that would stall or explode the animation
    pub fn validate(&self) -> Result<(), OrbError> {
        let positive = [
            ("physics.dt", self.physics.dt as f64),
            ("physics.max_speed", self.physics.max_speed as f64),
            ("physics.softening", self.physics.softening as f64),
            ("physics.steps_per_second", self.physics.steps_per_second as f64),
            ("motion.condense_base_ms", self.motion.condense_base_ms),
            ("motion.expand_ms", self.motion.expand_ms),
            ("motion.disperse_ms", self.motion.disperse_ms),
            ("motion.reconverge_ms", self.motion.reconverge_ms),
            ("motion.condense_fade_end", self.motion.condense_fade_end as f64),
            ("motion.expand_fade_end", self.motion.expand_fade_end as f64),
            ("motion.disperse_flash_end", self.motion.disperse_flash_end as f64),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(OrbError::ProfileValue { field, value });
            }
        }
        let non_negative = [
            ("physics.g * physics.mass", (self.physics.g * self.physics.mass) as f64),
            ("physics.boundary_force", self.physics.boundary_force as f64),
            ("physics.boundary_margin", self.physics.boundary_margin as f64),
            ("physics.spawn_radius_frac", self.physics.spawn_radius_frac as f64),
            ("physics.orbital_speed_factor", self.physics.orbital_speed_factor as f64),
            ("physics.jitter_frac", self.physics.jitter_frac as f64),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(OrbError::ProfileValue { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.physics.damping) {
            return Err(OrbError::ProfileValue {
                field: "physics.damping",
                value: self.physics.damping as f64,
            });
        }
        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "floating_orbs_profile";

    /// Load the profile from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(profile) => {
                        log::info!("Loaded {} profile from LocalStorage", profile.preset.as_str());
                        return profile;
                    }
                    Err(e) => log::warn!("Ignoring stored profile: {}", e),
                }
            }
        }

        log::info!("Using default profile");
        Self::default()
    }

    /// Save the profile to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Profile saved");
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
