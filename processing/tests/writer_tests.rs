use common::{config::WriterConfig, test_helpers::TestWorkspace};
use mockall::{Sequence, mock};
use processing::{
    error::WriteError,
    table::{Cell, Requirement, Row, Table},
    writer::{CsvDirectorySink, TableSink, TableWriter},
};
use std::{fs, path::PathBuf};

mock! {
    Sink {}

    impl TableSink for Sink {
        fn write_table(&mut self, table: &Table) -> Result<PathBuf, WriteError>;
    }
}

struct Line {
    id: &'static str,
    note: Option<&'static str>,
}

impl Row for Line {
    const COLUMNS: &'static [&'static str] = &["id", "note"];

    fn cells(&self) -> Vec<Cell> {
        vec![Some(self.id.to_string()), self.note.map(str::to_string)]
    }
}

fn line(id: &'static str, note: Option<&'static str>) -> Line {
    Line { id, note }
}

fn tables(optional_rows: &[Line]) -> Vec<Table> {
    vec![
        Table::from_rows("alpha", &[line("1", Some("a"))]),
        Table::from_rows("beta", optional_rows).with_requirement(Requirement::Optional),
        Table::from_rows("gamma", &[line("2", None)]),
    ]
}

#[test]
fn test_empty_required_table_aborts_before_any_write() {
    let mut sink = MockSink::new();
    sink.expect_write_table().times(0);

    let batch = vec![
        Table::from_rows("alpha", &[line("1", None)]),
        Table::from_rows::<Line>("orders", &[]),
    ];
    let mut writer = TableWriter::new(sink, false);

    match writer.write_all(&batch) {
        Err(WriteError::EmptyTable { table }) => assert_eq!(table, "orders"),
        other => panic!("expected EmptyTable, got {:?}", other),
    }
}

#[test]
fn test_empty_table_message_is_descriptive() {
    let err = WriteError::EmptyTable {
        table: "customers".to_string(),
    };
    assert_eq!(err.to_string(), "customers table is empty");
}

#[test]
fn test_empty_optional_table_is_still_written() {
    let mut sink = MockSink::new();
    let mut seq = Sequence::new();
    for name in ["alpha", "beta", "gamma"] {
        sink.expect_write_table()
            .withf(move |table| table.name() == name)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|table| Ok(PathBuf::from(table.file_name())));
    }

    let mut writer = TableWriter::new(sink, false);
    let written = writer.write_all(&tables(&[])).unwrap();

    assert_eq!(
        written,
        vec![
            PathBuf::from("alpha.csv"),
            PathBuf::from("beta.csv"),
            PathBuf::from("gamma.csv")
        ]
    );
}

#[test]
fn test_strict_mode_rejects_empty_optional_table() {
    let mut sink = MockSink::new();
    sink.expect_write_table().times(0);

    let mut writer = TableWriter::new(sink, true);

    match writer.write_all(&tables(&[])) {
        Err(WriteError::EmptyTable { table }) => assert_eq!(table, "beta"),
        other => panic!("expected EmptyTable, got {:?}", other),
    }
}

#[test]
fn test_strict_mode_accepts_populated_optional_table() {
    let mut sink = MockSink::new();
    sink.expect_write_table()
        .times(3)
        .returning(|table| Ok(PathBuf::from(table.file_name())));

    let mut writer = TableWriter::new(sink, true);
    assert_eq!(writer.write_all(&tables(&[line("3", None)])).unwrap().len(), 3);
}

#[test]
fn test_sink_failure_propagates() {
    let mut sink = MockSink::new();
    sink.expect_write_table().times(1).returning(|table| {
        Err(WriteError::Io {
            path: PathBuf::from(table.file_name()),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    });

    let mut writer = TableWriter::new(sink, false);
    assert!(matches!(
        writer.write_all(&tables(&[])),
        Err(WriteError::Io { .. })
    ));
}

#[test]
fn test_csv_sink_writes_header_and_empty_cells() {
    let workspace = TestWorkspace::new();
    let mut sink = CsvDirectorySink::new(workspace.output_dir(), b',');

    let table = Table::from_rows(
        "notes",
        &[line("1", Some("plain")), line("2", None), line("3", Some("has, comma"))],
    );
    let path = sink.write_table(&table).unwrap();

    assert_eq!(path, workspace.output_dir().join("notes.csv"));
    assert_eq!(
        workspace.read_output("notes.csv"),
        "id,note\n1,plain\n2,\n3,\"has, comma\"\n"
    );
}

#[test]
fn test_csv_sink_writes_header_for_empty_table() {
    let workspace = TestWorkspace::new();
    let mut sink = CsvDirectorySink::new(workspace.output_dir(), b',');

    sink.write_table(&Table::from_rows::<Line>("discounts", &[]))
        .unwrap();

    assert_eq!(workspace.read_output("discounts.csv"), "id,note\n");
}

#[test]
fn test_csv_sink_overwrites_existing_file() {
    let workspace = TestWorkspace::new();
    fs::create_dir_all(workspace.output_dir()).unwrap();
    fs::write(
        workspace.output_dir().join("notes.csv"),
        "stale,data\nfrom,before\nmore,rows\n",
    )
    .unwrap();

    let mut sink = CsvDirectorySink::new(workspace.output_dir(), b',');
    sink.write_table(&Table::from_rows("notes", &[line("1", None)]))
        .unwrap();

    assert_eq!(workspace.read_output("notes.csv"), "id,note\n1,\n");
}

#[test]
fn test_csv_sink_uses_configured_delimiter() {
    let workspace = TestWorkspace::new();
    let config = WriterConfig {
        output_dir: workspace.output_dir(),
        delimiter: ';',
        strict_optional_tables: false,
    };
    let mut sink = CsvDirectorySink::from_config(&config).unwrap();

    sink.write_table(&Table::from_rows("notes", &[line("1", Some("x"))]))
        .unwrap();

    assert_eq!(workspace.read_output("notes.csv"), "id;note\n1;x\n");
}
