use super::*;

const CLEANED: &str = "\
id,name,city,cuisine,rating,rating_count,cost,address,link
1,Pizza Place,Metro,Italian,4.5,100,300,12 Main Street,https://order.example/pizza
2,Noodle Bar,Metro,Chinese,4.1,50,250,,
3,Dosa Hut,Pune,South Indian,3.9,20,150,nan,https://order.example/dosa
";

#[test]
fn test_dataset_loads_rows_in_order() {
    let ds = Dataset::from_reader(CLEANED.as_bytes(), "cleaned.csv").expect("valid CSV");
    assert_eq!(ds.len(), 3);
    assert!(!ds.is_empty());
    let names: Vec<&str> = ds.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Pizza Place", "Noodle Bar", "Dosa Hut"]);
}

#[test]
fn test_dataset_parses_numeric_columns() {
    let ds = Dataset::from_reader(CLEANED.as_bytes(), "cleaned.csv").expect("valid CSV");
    let row = ds.get(0).expect("row 0");
    assert!((row.rating - 4.5).abs() < 1e-9);
    assert!((row.rating_count - 100.0).abs() < 1e-9);
    assert!((row.cost - 300.0).abs() < 1e-9);
}

#[test]
fn test_dataset_blank_optional_fields_are_none() {
    let ds = Dataset::from_reader(CLEANED.as_bytes(), "cleaned.csv").expect("valid CSV");
    let noodle = ds.get(1).expect("row 1");
    assert!(noodle.address.is_none());
    assert!(noodle.link.is_none());

    let dosa = ds.get(2).expect("row 2");
    assert!(dosa.address.is_none(), "'nan' should read as missing");
    assert_eq!(dosa.link.as_deref(), Some("https://order.example/dosa"));
}

#[test]
fn test_dataset_optional_columns_may_be_absent() {
    let csv = "name,city,cuisine,rating,rating_count,cost\nA,X,Y,4.0,10,100\n";
    let ds = Dataset::from_reader(csv.as_bytes(), "min.csv").expect("valid CSV");
    assert_eq!(ds.len(), 1);
    assert!(ds.get(0).expect("row").address.is_none());
}

#[test]
fn test_dataset_missing_required_column() {
    let csv = "name,city,rating,rating_count,cost\nA,X,4.0,10,100\n";
    let err = Dataset::from_reader(csv.as_bytes(), "bad.csv").unwrap_err();
    match err {
        DinerecError::MissingColumn { column, .. } => assert_eq!(column, "cuisine"),
        other => panic!("expected MissingColumn, got {other}"),
    }
}

#[test]
fn test_dataset_non_numeric_rating_is_error() {
    let csv = "name,city,cuisine,rating,rating_count,cost\nA,X,Y,--,10,100\n";
    let err = Dataset::from_reader(csv.as_bytes(), "bad.csv").unwrap_err();
    assert!(matches!(err, DinerecError::Csv { .. }));
    assert!(!err.is_recoverable());
}

#[test]
fn test_dataset_missing_file() {
    let err = Dataset::from_csv_path("/nonexistent/cleaned_data.csv").unwrap_err();
    assert!(matches!(err, DinerecError::MissingFile { .. }));
}

#[test]
fn test_pca_frame_plain_columns() {
    let csv = "PC1,PC2\n0.5,-1.0\n1.5,2.0\n";
    let frame = PcaFrame::from_reader(csv.as_bytes(), "pca.csv").expect("valid CSV");
    assert_eq!(frame.n_rows(), 2);
    assert_eq!(frame.n_components(), 2);
    assert_eq!(frame.columns(), &["PC1".to_string(), "PC2".to_string()]);
    assert_eq!(frame.vector(1), &[1.5, 2.0]);
}

#[test]
fn test_pca_frame_skips_pandas_index_column() {
    let csv = "Unnamed: 0,PC1,PC2\n0,0.5,-1.0\n1,1.5,2.0\n";
    let frame = PcaFrame::from_reader(csv.as_bytes(), "pca.csv").expect("valid CSV");
    assert_eq!(frame.n_components(), 2);
    assert_eq!(frame.vector(0), &[0.5, -1.0]);

    let csv = ",PC1\n0,3.0\n";
    let frame = PcaFrame::from_reader(csv.as_bytes(), "pca.csv").expect("valid CSV");
    assert_eq!(frame.vector(0), &[3.0]);
}

#[test]
fn test_pca_frame_non_numeric_value() {
    let csv = "PC1,PC2\n0.5,abc\n";
    let err = PcaFrame::from_reader(csv.as_bytes(), "pca.csv").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("line 2"), "{msg}");
    assert!(msg.contains("PC2"), "{msg}");
}

#[test]
fn test_pca_frame_ragged_row_is_error() {
    let csv = "PC1,PC2\n0.5\n";
    assert!(PcaFrame::from_reader(csv.as_bytes(), "pca.csv").is_err());
}

#[test]
fn test_pca_frame_new_validates_width() {
    let m = Matrix::from_vec(1, 2, vec![0.0, 1.0]).expect("valid");
    assert!(PcaFrame::new(vec!["PC1".into()], m.clone()).is_err());
    assert!(PcaFrame::new(vec!["PC1".into(), "PC2".into()], m).is_ok());
}
