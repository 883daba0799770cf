//! Output file naming
//!
//! Output names are derived from the input file name by replacing the
//! `results` token with the chart kind and the `.dat` extension with the output one,
//! so `linear_results_c1.dat` becomes `linear_population_timings_c1.png`.

use crate::analysis::constants::{RESULTS_TOKEN, RESULT_FILE_EXTENSION};
use std::path::{Path, PathBuf};

/// Derives the output path for one artifact generated from `input`
///
/// Names without the `results` token are prefixed with the kind instead, and names
/// without the `.dat` extension have the output extension appended, so artifacts of
/// different kinds never share a file.
///
/// # Arguments
/// * `output_dir` - Directory the artifact is written to
/// * `input` - Result file the artifact was generated from
/// * `kind` - Chart or report kind, e.g. `population_comparisons`
/// * `extension` - Output extension without the leading dot, e.g. `png`
pub fn derive_output_path(output_dir: &Path, input: &Path, kind: &str, extension: &str) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = if name.contains(RESULTS_TOKEN) {
        name.replace(RESULTS_TOKEN, kind)
    } else {
        format!("{kind}_{name}")
    };

    let input_extension = format!(".{RESULT_FILE_EXTENSION}");
    let output_extension = format!(".{extension}");
    let name = if name.contains(&input_extension) {
        name.replace(&input_extension, &output_extension)
    } else {
        format!("{name}{output_extension}")
    };

    output_dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::results_file(
        "linear_results_c1_D=2_NON_DOM=128_c=1.0.dat",
        "population_comparisons",
        "png",
        "linear_population_comparisons_c1_D=2_NON_DOM=128_c=1.0.png"
    )]
    #[case::plain_results("results.dat", "population_timings", "png", "population_timings.png")]
    #[case::no_token("linear.dat", "population_eliteComparisons", "png", "population_eliteComparisons_linear.png")]
    #[case::no_extension("results_c2", "summary", "txt", "summary_c2.txt")]
    #[case::json_summary("results_c3.dat", "summary", "json", "summary_c3.json")]
    fn derives_output_names(
        #[case] input: &str,
        #[case] kind: &str,
        #[case] extension: &str,
        #[case] expected: &str,
    ) {
        let output_dir = Path::new("report/plots");
        let path = derive_output_path(output_dir, Path::new(input), kind, extension);
        assert_eq!(path, output_dir.join(expected));
    }

    #[test]
    fn ignores_input_directory() {
        let path = derive_output_path(
            Path::new("out"),
            Path::new("/data/results/results_c1.dat"),
            "population_timings",
            "png",
        );
        assert_eq!(path, Path::new("out").join("population_timings_c1.png"));
    }
}
