//! Spectrum of the scope buffer on log-spaced frequency bins

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Number of frequency bins to display
const SPECTRUM_BINS: usize = 40;
const LOWEST_HZ: f64 = 30.0;
const FLOOR_DB: f64 = -90.0;
/// Per-update fall of displayed levels, so transients stay visible
const DECAY_DB: f64 = 3.0;

pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    /// FFT bin index behind each displayed point
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (log10 frequency, level in dB)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let buffer_len = buffer_len.max(2);
        let fft = FftPlanner::new().plan_fft_forward(buffer_len);

        let denom = (buffer_len - 1) as f32;
        let window = (0..buffer_len)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        let sample_rate = f64::from(sample_rate).max(2.0 * LOWEST_HZ + 1.0);
        let nyquist = (sample_rate / 2.0).min(20_000.0);
        let last_bin = buffer_len / 2 - 1;

        let (bin_indices, spectrum) = (0..SPECTRUM_BINS)
            .map(|i| {
                let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
                let freq = LOWEST_HZ * (nyquist / LOWEST_HZ).powf(t);
                let index = ((freq * buffer_len as f64 / sample_rate).round() as usize)
                    .clamp(1, last_bin.max(1));
                (index, (freq.log10(), FLOOR_DB))
            })
            .unzip();

        Self {
            window,
            bin_indices,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            spectrum,
        }
    }

    /// Analyse `buffer`; ignored unless it is exactly one FFT frame long.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        let norm = 2.0 / self.window.len() as f64;
        for (point, &index) in self.spectrum.iter_mut().zip(&self.bin_indices) {
            let magnitude = f64::from(self.scratch[index].norm()) * norm;
            let db = (20.0 * magnitude.max(1e-9).log10()).max(FLOOR_DB);
            point.1 = db.max(point.1 - DECAY_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let (low, high) = match (spectrum.first(), spectrum.last()) {
        (Some(first), Some(last)) if last.0 > first.0 => (first.0, last.0),
        _ => (LOWEST_HZ.log10(), 20_000f64.log10()),
    };

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([low, high])
                .labels(vec!["30", "1k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 0.0])
                .labels(vec!["-90", "-45", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_peaks_near_its_frequency() {
        let sample_rate = 44_100.0;
        let len = 1024;
        let mut analyzer = SpectrumAnalyzer::new(len, sample_rate);
        let freq = 1_000.0;
        let buffer: Vec<f32> = (0..len)
            .map(|i| (std::f32::consts::TAU * freq * i as f32 / sample_rate).sin())
            .collect();
        analyzer.update(&buffer);

        let (loudest, _) = analyzer
            .data()
            .iter()
            .fold((0.0, FLOOR_DB), |best, &(f, db)| if db > best.1 { (f, db) } else { best });
        let hz = 10f64.powf(loudest);
        assert!((hz - 1_000.0).abs() < 200.0, "peak at {hz}");
    }

    #[test]
    fn wrong_length_is_ignored() {
        let mut analyzer = SpectrumAnalyzer::new(256, 48_000.0);
        analyzer.update(&[1.0; 100]);
        assert!(analyzer.data().iter().all(|&(_, db)| db == FLOOR_DB));
    }
}
