use anyhow::{Context, Result};
use approx::assert_abs_diff_eq;
use ndarray::Array4;
use std::path::PathBuf;
use stylize_rs::inference::{input_shape, output_shape};
use stylize_rs::{Device, StyleModel, StylizeError};

fn fixture_path() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.join("../tests/fixtures/wave.onnx")
}

#[test]
fn load_rejects_malformed_bytes() {
    let err = StyleModel::from_bytes(b"definitely not an onnx model", Device::cpu())
        .err()
        .expect("malformed model bytes must not load");
    assert!(matches!(err, StylizeError::Load(_)), "unexpected error: {err}");
}

#[test]
fn load_rejects_empty_stream() {
    let err = StyleModel::from_reader(std::io::empty(), Device::cpu())
        .err()
        .expect("an empty model stream must not load");
    assert!(matches!(err, StylizeError::Load(_)), "unexpected error: {err}");
}

#[test]
fn load_missing_model_path_fails() {
    let err = StyleModel::load("/nonexistent/wave.onnx", Device::cpu())
        .err()
        .expect("a missing model path must not load");
    assert!(matches!(err, StylizeError::FileNotFound(_)), "unexpected error: {err}");
}

#[test]
fn evaluate_wave_model_end_to_end() -> Result<()> {
    let model_path = fixture_path();
    if !model_path.exists() {
        eprintln!(
            "skipping: missing test fixture at {} (see tests/fixtures/README.md)",
            model_path.display()
        );
        return Ok(());
    }

    let mut model =
        StyleModel::load(&model_path, Device::cpu()).context("Failed to load wave model fixture")?;

    // Output keeps the batch dimension and gains one column of width.
    let input = Array4::<f32>::zeros(input_shape(1));
    let first = model.evaluate(&input)?;
    assert_eq!(first.output.shape(), output_shape(1).as_slice());

    // The binding is rebuilt per call, so repeating the same input must
    // reproduce the same output.
    let repeated = model.evaluate(&input)?;
    for (a, b) in repeated.output.iter().zip(first.output.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
    }

    // Shape validation happens inside the runtime; a mismatched input fails
    // there and must leave the wrapper usable.
    let mismatched = Array4::<f32>::zeros((1, 3, 720, 100));
    let err = model
        .evaluate(&mismatched)
        .err()
        .expect("mismatched input shape must fail");
    assert!(
        matches!(err, StylizeError::Evaluation(_)),
        "unexpected error: {err}"
    );

    // A correctly shaped evaluation still succeeds afterwards, and a
    // different input produces a different output.
    let second_input = Array4::<f32>::from_elem(input_shape(1), 0.5);
    let second = model.evaluate(&second_input)?;
    assert_eq!(second.output.shape(), output_shape(1).as_slice());

    let max_delta = (&second.output - &first.output)
        .iter()
        .map(|v| v.abs())
        .fold(0.0f32, f32::max);
    assert!(max_delta > 1e-6, "distinct inputs produced identical outputs");

    Ok(())
}
