use std::f64::consts::PI;

use serde::Deserialize;

use crate::error::CoreError;

#[derive(Deserialize, Debug, Clone)]
pub struct NetworkSettings {
    pub length: f64,
    pub lanes: u32,
    pub speed_limit: f64,
    pub resolution: usize,
}

/// Validated dimensions of the ring road.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkParams {
    length: f64,
    lanes: u32,
    speed_limit: f64,
    resolution: usize,
}

impl NetworkParams {
    pub fn new(
        length: f64,
        lanes: u32,
        speed_limit: f64,
        resolution: usize,
    ) -> Result<Self, CoreError> {
        if !length.is_finite() || length <= 0.0 {
            return Err(CoreError::Geometry {
                parameter: "length",
                reason: format!("must be a positive finite number, got {}", length),
            });
        }
        if lanes == 0 {
            return Err(CoreError::Geometry {
                parameter: "lanes",
                reason: "at least one lane is required".to_string(),
            });
        }
        if !speed_limit.is_finite() || speed_limit <= 0.0 {
            return Err(CoreError::Geometry {
                parameter: "speed_limit",
                reason: format!("must be a positive finite number, got {}", speed_limit),
            });
        }
        if resolution < 2 {
            return Err(CoreError::Geometry {
                parameter: "resolution",
                reason: format!("an arc needs at least 2 samples, got {}", resolution),
            });
        }
        Ok(Self {
            length,
            lanes,
            speed_limit,
            resolution,
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn lanes(&self) -> u32 {
        self.lanes
    }

    pub fn speed_limit(&self) -> f64 {
        self.speed_limit
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    // Downstream consumers rely on r = length / pi, not length / (2 pi).
    pub fn radius(&self) -> f64 {
        self.length / PI
    }

    pub fn edge_length(&self) -> f64 {
        self.length / 4.0
    }
}

impl TryFrom<&NetworkSettings> for NetworkParams {
    type Error = CoreError;

    fn try_from(settings: &NetworkSettings) -> Result<Self, Self::Error> {
        NetworkParams::new(
            settings.length,
            settings.lanes,
            settings.speed_limit,
            settings.resolution,
        )
    }
}

/// Raw time window as read from the configuration. Both fields are optional
/// here so a missing value is reported by name instead of as a parse failure.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ScenarioSettings {
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioParams {
    start_time: f64,
    end_time: f64,
}

impl ScenarioParams {
    pub fn new(start_time: f64, end_time: f64) -> Result<Self, CoreError> {
        if !start_time.is_finite() || start_time < 0.0 {
            return Err(CoreError::configuration(
                "start_time",
                format!("must be a non-negative number, got {}", start_time),
            ));
        }
        if !end_time.is_finite() || end_time < start_time {
            return Err(CoreError::configuration(
                "end_time",
                format!("must not be earlier than start_time {}", start_time),
            ));
        }
        Ok(Self {
            start_time,
            end_time,
        })
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }
}

impl TryFrom<&ScenarioSettings> for ScenarioParams {
    type Error = CoreError;

    fn try_from(settings: &ScenarioSettings) -> Result<Self, Self::Error> {
        let start_time = settings.start_time.ok_or_else(|| {
            CoreError::configuration("start_time", "start time of the circle not supplied")
        })?;
        let end_time = settings.end_time.ok_or_else(|| {
            CoreError::configuration("end_time", "end time of the circle not supplied")
        })?;
        ScenarioParams::new(start_time, end_time)
    }
}
