use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::params::TrainingConfig;
use crate::data::stats::DatasetStats;
use crate::error::{BpnnError, Result};
use crate::layers::dense::Layer;
use crate::network::network::Network;
use crate::train::evaluation::Evaluation;

/// Human-readable run report: configuration echo and data statistics, then
/// per fold the trained weights and the test and cross-validation errors.
pub struct Report<W: Write> {
    out: W,
    path: PathBuf,
}

impl Report<BufWriter<File>> {
    /// Creates (or truncates) the report file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| BpnnError::io(path, e))?;
        Ok(Report::new(BufWriter::new(file), path))
    }
}

impl<W: Write> Report<W> {
    /// Wraps any writer; `path` only labels I/O errors.
    pub fn new(out: W, path: impl Into<PathBuf>) -> Self {
        Report { out, path: path.into() }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn io(&self, e: std::io::Error) -> BpnnError {
        BpnnError::io(self.path.clone(), e)
    }

    pub fn write_header(&mut self, config: &TrainingConfig, stats: &DatasetStats) -> Result<()> {
        self.write_header_inner(config, stats).map_err(|e| self.io(e))
    }

    fn write_header_inner(&mut self, config: &TrainingConfig, stats: &DatasetStats) -> std::io::Result<()> {
        write!(self.out, "{config}")?;
        writeln!(self.out, "Data Statistics: Min Max Mean StdDev")?;
        for (label, cols) in [("Input", &stats.inputs), ("Output", &stats.outputs)] {
            for i in 0..cols.width() {
                writeln!(
                    self.out,
                    "{label}: {}    {}    {}    {}",
                    cols.min[i], cols.max[i], cols.mean[i], cols.std_dev[i]
                )?;
            }
        }
        Ok(())
    }

    /// Dumps every weight of `network` after training with `excluded` held out.
    pub fn write_weights(&mut self, excluded: usize, k: usize, network: &Network) -> Result<()> {
        self.write_weights_inner(excluded, k, network).map_err(|e| self.io(e))
    }

    fn write_weights_inner(&mut self, excluded: usize, k: usize, network: &Network) -> std::io::Result<()> {
        writeln!(self.out, "The following are the weights obtained excluding every {excluded} +n{k}")?;
        for (index, layer) in network.hidden.iter().enumerate() {
            writeln!(self.out, "Layer {index}")?;
            self.write_nodes(layer)?;
        }
        writeln!(self.out, "Output layer weights")?;
        self.write_nodes(&network.output)
    }

    fn write_nodes(&mut self, layer: &Layer) -> std::io::Result<()> {
        for (index, neuron) in layer.neurons.iter().enumerate() {
            write!(self.out, "Node {index}: ")?;
            for w in &neuron.weights {
                write!(self.out, "{w} ")?;
            }
            writeln!(self.out, "threshold {}", neuron.threshold)?;
        }
        Ok(())
    }

    pub fn write_test(&mut self, eval: &Evaluation) -> Result<()> {
        self.write_summary("Results of tests:".to_string(), eval)
    }

    pub fn write_crossvalidation(&mut self, included: usize, k: usize, eval: &Evaluation) -> Result<()> {
        self.write_summary(format!("Results of cross validation using every {included} +n{k} pattern"), eval)
    }

    fn write_summary(&mut self, title: String, eval: &Evaluation) -> Result<()> {
        self.write_summary_inner(&title, eval).map_err(|e| self.io(e))
    }

    fn write_summary_inner(&mut self, title: &str, eval: &Evaluation) -> std::io::Result<()> {
        writeln!(self.out, "{title}")?;
        if eval.is_empty() {
            return writeln!(self.out, "No patterns evaluated.");
        }
        write!(self.out, "The error on these data is: ")?;
        for pct in eval.error_percentages() {
            write!(self.out, "{pct} ")?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "Mean energy: {}", eval.mean_energy())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(|e| self.io(e))
    }
}

/// Writes every `(predicted, expected)` pair of `eval`, one output column per
/// line, replacing whatever `path` held before.
pub fn write_results(path: impl AsRef<Path>, eval: &Evaluation) -> Result<()> {
    let path = path.as_ref();
    let io = |e| BpnnError::io(path, e);
    let mut out = BufWriter::new(File::create(path).map_err(io)?);
    for (predicted, expected) in &eval.rows {
        for (p, e) in predicted.iter().zip(expected.iter()) {
            writeln!(out, "{p}  {e}").map_err(io)?;
        }
    }
    out.flush().map_err(io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction;
    use crate::network::neuron::Neuron;

    fn text(report: Report<Vec<u8>>) -> String {
        String::from_utf8(report.into_inner()).unwrap()
    }

    #[test]
    fn output_weights_are_printed_by_weight_index() {
        let network = Network::from_layers(
            vec![Layer::from_neurons(vec![Neuron::with_weights(vec![0.5, -0.5], 0.0)])],
            Layer::from_neurons(vec![
                Neuron::with_weights(vec![1.0], 0.25),
                Neuron::with_weights(vec![2.0], 0.0),
            ]),
            ActivationFunction::Transfer,
            ActivationFunction::Transfer,
        );
        let mut report = Report::new(Vec::new(), "mem");
        report.write_weights(1, 4, &network).unwrap();
        assert_eq!(
            text(report),
            "The following are the weights obtained excluding every 1 +n4\n\
             Layer 0\n\
             Node 0: 0.5 -0.5 threshold 0\n\
             Output layer weights\n\
             Node 0: 1 threshold 0.25\n\
             Node 1: 2 threshold 0\n"
        );
    }

    #[test]
    fn summary_uses_float_percentages() {
        let mut eval = Evaluation::new(1);
        for p in [0.0, 1.0, 1.0, 1.0] {
            eval.push(vec![p], vec![1.0]);
        }
        let mut report = Report::new(Vec::new(), "mem");
        report.write_crossvalidation(0, 4, &eval).unwrap();
        let out = text(report);
        assert!(out.starts_with("Results of cross validation using every 0 +n4 pattern\n"));
        assert!(out.contains("The error on these data is: 25 \n"));
        assert!(out.contains("Mean energy: 0.125\n"));
    }

    #[test]
    fn empty_summary() {
        let mut report = Report::new(Vec::new(), "mem");
        report.write_test(&Evaluation::new(1)).unwrap();
        assert_eq!(text(report), "Results of tests:\nNo patterns evaluated.\n");
    }
}
