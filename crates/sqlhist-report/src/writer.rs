use crate::error::ReportResult;
use crate::record::CommitRecord;
use serde::Serialize;
use sqlhist_diff::Category;
use std::fs::File;
use std::path::Path;

/// Flat output row. Field order and names are the result-table layout;
/// each category cell is the sorted file set joined with `;`.
#[derive(Debug, Serialize)]
struct ReportRow {
    commit: String,
    commit_date: String,
    author_date: String,
    #[serde(rename = "ChangedFilesNum")]
    changed_files_num: usize,
    #[serde(rename = "SQLFilesNum")]
    sql_files_num: usize,
    #[serde(rename = "Whitespace")]
    whitespace: String,
    #[serde(rename = "DML")]
    dml: String,
    #[serde(rename = "Index")]
    index: String,
    #[serde(rename = "Comments")]
    comments: String,
    #[serde(rename = "NoDiffInfo")]
    no_diff_info: String,
    #[serde(rename = "Privilege")]
    privilege: String,
    #[serde(rename = "PK")]
    pk: String,
    #[serde(rename = "Engine")]
    engine: String,
    #[serde(rename = "Renaming")]
    renaming: String,
    #[serde(rename = "Other")]
    other: String,
}

impl From<&CommitRecord> for ReportRow {
    fn from(record: &CommitRecord) -> Self {
        Self {
            commit: record.commit.clone(),
            commit_date: record.commit_date.to_rfc3339(),
            author_date: record.author_date.to_rfc3339(),
            changed_files_num: record.changed_files,
            sql_files_num: record.sql_files,
            whitespace: record.categories.joined(Category::Whitespace),
            dml: record.categories.joined(Category::Dml),
            index: record.categories.joined(Category::Index),
            comments: record.categories.joined(Category::Comments),
            no_diff_info: record.categories.joined(Category::NoDiffInfo),
            privilege: record.categories.joined(Category::Privilege),
            pk: record.categories.joined(Category::Pk),
            engine: record.categories.joined(Category::Engine),
            renaming: record.categories.joined(Category::Renaming),
            other: record.categories.joined(Category::Other),
        }
    }
}

/// Write one project's records as CSV. An empty record list still
/// produces the header row.
pub fn write_csv(path: &Path, records: &[CommitRecord]) -> ReportResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if records.is_empty() {
        // serde-derived headers are only emitted with the first row.
        writer.write_record([
            "commit",
            "commit_date",
            "author_date",
            "ChangedFilesNum",
            "SQLFilesNum",
            "Whitespace",
            "DML",
            "Index",
            "Comments",
            "NoDiffInfo",
            "Privilege",
            "PK",
            "Engine",
            "Renaming",
            "Other",
        ])?;
    }
    for record in records {
        writer.serialize(ReportRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the same rows as a JSON array.
pub fn write_json(path: &Path, records: &[CommitRecord]) -> ReportResult<()> {
    let rows: Vec<ReportRow> = records.iter().map(ReportRow::from).collect();
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &rows)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ClassificationResult;
    use chrono::DateTime;
    use std::fs;

    fn sample_record() -> CommitRecord {
        let mut categories = ClassificationResult::new();
        categories.insert(Category::Dml, "sql/b.sql");
        categories.insert(Category::Dml, "sql/a.sql");
        categories.insert(Category::Other, "sql/a.sql");
        CommitRecord {
            commit: "a20812702f34235202384c23842805b923293841".to_string(),
            commit_date: DateTime::parse_from_rfc3339("2008-03-28T15:01:43+00:00").unwrap(),
            author_date: DateTime::parse_from_rfc3339("2008-03-28T14:59:02+00:00").unwrap(),
            changed_files: 4,
            sql_files: 2,
            categories,
        }
    }

    const HEADER: &str = "commit,commit_date,author_date,ChangedFilesNum,SQLFilesNum,\
                          Whitespace,DML,Index,Comments,NoDiffInfo,Privilege,PK,Engine,\
                          Renaming,Other";

    #[test]
    fn csv_layout_matches_the_result_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biosql.csv");
        write_csv(&path, &[sample_record()]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), HEADER);
        let row = lines.next().unwrap();
        assert!(row.starts_with("a20812702f34235202384c23842805b923293841,"));
        assert!(row.contains("2008-03-28T15:01:43+00:00"));
        assert!(row.contains("4,2"));
        assert!(row.contains("sql/a.sql;sql/b.sql"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn empty_record_list_writes_a_header_only_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_csv(&path, &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), HEADER);
    }

    #[test]
    fn json_rows_mirror_the_csv_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biosql.json");
        write_json(&path, &[sample_record()]).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["SQLFilesNum"], 2);
        assert_eq!(rows[0]["DML"], "sql/a.sql;sql/b.sql");
        assert_eq!(rows[0]["Other"], "sql/a.sql");
        assert_eq!(rows[0]["Whitespace"], "");
    }
}
