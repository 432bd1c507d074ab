use std::path::Path;

const CSV_SUFFIX: &str = ".csv";

/// Strip exactly one trailing `.csv`.
///
/// `stem(&format!("{}.csv", stem(x))) == stem(x)` for every `x`.
pub fn stem(name: &str) -> &str {
    name.strip_suffix(CSV_SUFFIX).unwrap_or(name)
}

/// Label for a table loaded from `path`: its file name without `.csv`.
/// Directories never leak into labels, so output names stay flat.
pub fn label_for(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    stem(&name).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_one_trailing_csv() {
        assert_eq!(stem("run1.csv"), "run1");
        assert_eq!(stem("run1"), "run1");
        assert_eq!(stem("run1.csv.csv"), "run1.csv");
        assert_eq!(stem("run1.CSV"), "run1.CSV");
        assert_eq!(stem("csv"), "csv");
    }

    #[test]
    fn stem_is_idempotent_through_csv_suffix() {
        for name in ["a", "a.csv", "a.csv.csv", "gc_node1.csv", "x.tsv", ""] {
            let once = stem(name);
            let again = format!("{}.csv", once);
            assert_eq!(stem(&again), once, "name {:?}", name);
        }
    }

    #[test]
    fn label_drops_directories() {
        assert_eq!(label_for(Path::new("data/run1.csv")), "run1");
        assert_eq!(label_for(Path::new("/tmp/cpu_app.csv")), "cpu_app");
        assert_eq!(label_for(Path::new("plain")), "plain");
    }
}
