//! Dashboard side-panel state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Holds the last uploaded sensor series and the latest structured results
//! pulled out of model replies. Nothing here is persisted: sensor data lives
//! until the next upload or sign-out, and recommendations are cleared when the
//! active session changes.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use replies::{Extraction, MachinerySpec, ScheduleTask};
use sensors::SensorDataPoint;

/// Aggregate figures for the uploaded series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorSummary {
    pub samples: usize,
    pub peak_vibration: f64,
    pub mean_temperature: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    pub points: Vec<SensorDataPoint>,
    pub source_name: Option<String>,
    /// Diagnostic for the last rejected upload.
    pub upload_error: Option<String>,
    pub machinery: Option<MachinerySpec>,
    /// Replaced wholesale by each extraction that carries a schedule.
    pub schedule: Vec<ScheduleTask>,
}

impl DashboardState {
    /// Parse an uploaded file into the sensor series.
    ///
    /// On failure the previous series is kept and `upload_error` explains why.
    pub fn ingest_file(&mut self, file_name: &str, content: &str) -> Result<usize, String> {
        let result = if sensors::is_supported_upload(file_name) {
            sensors::parse(file_name, content).map_err(|e| format!("{file_name}: {e}"))
        } else {
            Err(format!("{file_name}: 仅支持 .csv、.json、.txt 文件"))
        };
        match result {
            Ok(points) => {
                let count = points.len();
                self.points = points;
                self.source_name = Some(file_name.to_owned());
                self.upload_error = None;
                Ok(count)
            }
            Err(message) => {
                log::warn!("sensor upload rejected: {message}");
                self.upload_error = Some(message.clone());
                Err(message)
            }
        }
    }

    /// Take the structured parts of a reply. Absent parts leave the current
    /// values in place.
    pub fn apply_extraction(&mut self, extraction: &Extraction) {
        if let Some(spec) = extraction.machinery_spec() {
            self.machinery = Some(spec);
        }
        if let Some(tasks) = extraction.schedule_tasks() {
            self.schedule = tasks;
        }
    }

    pub fn clear_recommendations(&mut self) {
        self.machinery = None;
        self.schedule.clear();
    }

    pub fn summary(&self) -> Option<SensorSummary> {
        if self.points.is_empty() {
            return None;
        }
        let peak_vibration = self.points.iter().map(|p| p.vibration).fold(f64::NEG_INFINITY, f64::max);
        #[allow(clippy::cast_precision_loss)]
        let mean_temperature = self.points.iter().map(|p| p.temperature).sum::<f64>() / self.points.len() as f64;
        Some(SensorSummary { samples: self.points.len(), peak_vibration, mean_temperature })
    }
}
