//! End-to-end tests: file sources through assembly and rendering

use std::fs;
use std::path::PathBuf;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use tabtree::util::testing;
use tabtree::{
    build_from_path, render, ColumnType, LinkMode, TableError, TableOptions, TableResult, Value,
};

fn create_data_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write data file");
    path
}

#[fixture]
fn bookmarks() -> (TempDir, PathBuf) {
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    let path = create_data_file(
        &temp,
        "bookmarks.tsv",
        "id\tname\turl\tparentId\n\
         1\tTools\t\t\n\
         2\tSearch\thttps://search.example\t1\n\
         3\tDocs\thttp://docs.example\t1\n\
         4\tMisc\t\t\n",
    );
    (temp, path)
}

#[rstest]
fn given_bookmark_file_when_building_then_schema_and_forest_match(
    bookmarks: (TempDir, PathBuf),
) -> TableResult<()> {
    let (_temp, path) = bookmarks;

    // Act
    let table = build_from_path(path.to_str().unwrap(), &TableOptions::default())?;

    // Assert: inferred schema
    let types: Vec<ColumnType> = table.schema().columns().iter().map(|c| c.ty).collect();
    assert_eq!(
        types,
        vec![
            ColumnType::Double,
            ColumnType::String,
            ColumnType::Url,
            ColumnType::Double
        ]
    );

    // Assert: forest shape
    assert_eq!(table.node_count(), 4);
    let roots = table.roots();
    assert_eq!(roots.len(), 2);
    assert_eq!(table.children(roots[0]).len(), 2);
    assert!(table.children(roots[1]).is_empty());

    // Assert: typed access by column name
    assert_eq!(
        table.value(roots[0], "name").and_then(Value::as_text),
        Some("Tools")
    );
    let search = table.children(roots[0])[0];
    assert_eq!(
        table.value(search, "url").and_then(Value::as_text),
        Some("https://search.example")
    );
    assert_eq!(
        table.value(search, "id").and_then(Value::as_double),
        Some(2.0)
    );
    Ok(())
}

#[rstest]
fn given_bookmark_file_when_traversing_then_metrics_match(
    bookmarks: (TempDir, PathBuf),
) -> TableResult<()> {
    let (_temp, path) = bookmarks;
    let table = build_from_path(path.to_str().unwrap(), &TableOptions::default())?;

    // Act
    let preorder: Vec<String> = table
        .iter()
        .map(|(id, _)| {
            table
                .value(id, "name")
                .map(|v| v.to_string())
                .unwrap_or_default()
        })
        .collect();

    // Assert
    assert_eq!(preorder, vec!["Tools", "Search", "Docs", "Misc"]);
    assert_eq!(table.depth(), 2);
    assert_eq!(table.leaf_nodes().len(), 3);

    // Postorder visits parents after their children
    let last = table.iter_postorder().last().map(|(id, _)| {
        table
            .value(id, "name")
            .map(|v| v.to_string())
            .unwrap_or_default()
    });
    assert_eq!(last.as_deref(), Some("Misc"));
    Ok(())
}

#[rstest]
fn given_bookmark_file_when_rendering_then_children_are_indented(
    bookmarks: (TempDir, PathBuf),
) -> TableResult<()> {
    let (_temp, path) = bookmarks;
    let table = build_from_path(path.to_str().unwrap(), &TableOptions::default())?;

    // Act
    let trees = render::to_tree_strings(&table, "name")?;

    // Assert: children carry branch prefixes under their root's line
    assert_eq!(trees.len(), 2);
    let rendered = trees[0].to_string();
    let mut lines = rendered.lines();
    assert_eq!(lines.next(), Some("Tools"));
    assert!(rendered.contains("── Search"));
    assert!(rendered.contains("── Docs"));
    assert_eq!(trees[1].to_string().lines().next(), Some("Misc"));
    Ok(())
}

#[rstest]
fn given_unknown_label_column_when_rendering_then_errors(bookmarks: (TempDir, PathBuf)) {
    let (_temp, path) = bookmarks;
    let table = build_from_path(path.to_str().unwrap(), &TableOptions::default()).unwrap();

    let result = render::to_tree_strings(&table, "ghost");

    assert!(matches!(result, Err(TableError::Configuration(_))));
}

#[test]
fn given_crlf_file_when_building_then_matches_lf_file() -> TableResult<()> {
    // Arrange
    let temp = TempDir::new().unwrap();
    let lf = create_data_file(&temp, "lf.tsv", "id\tname\tparentId\n1\ta\t\n2\tb\t1\n");
    let crlf = create_data_file(
        &temp,
        "crlf.tsv",
        "id\tname\tparentId\r\n1\ta\t\r\n2\tb\t1\r\n",
    );

    // Act
    let lf_table = build_from_path(lf.to_str().unwrap(), &TableOptions::default())?;
    let crlf_table = build_from_path(crlf.to_str().unwrap(), &TableOptions::default())?;

    // Assert: identical rendered shape
    let show = |table: &tabtree::TreeTable| -> TableResult<Vec<String>> {
        Ok(render::to_tree_strings(table, "name")?
            .iter()
            .map(|tree| tree.to_string())
            .collect())
    };
    assert_eq!(show(&lf_table)?, show(&crlf_table)?);
    Ok(())
}

#[test]
fn given_dot_delimited_file_when_building_then_splits_literally() -> TableResult<()> {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_data_file(&temp, "dotted.txt", "id.name.parentId\n1.a.\n2.b.1\n");
    let options = TableOptions {
        delimiter: ".".to_string(),
        ..TableOptions::default()
    };

    // Act
    let table = build_from_path(path.to_str().unwrap(), &options)?;

    // Assert
    let roots = table.roots();
    assert_eq!(roots.len(), 1);
    assert_eq!(table.children(roots[0]).len(), 1);
    Ok(())
}

#[test]
fn given_child_mode_file_when_building_then_list_order_is_kept() -> TableResult<()> {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_data_file(
        &temp,
        "groups.tsv",
        "id\tname\tchildIds\n10\troot\t30,20\n20\ta\t\n30\tb\t\n",
    );
    let options = TableOptions {
        mode: LinkMode::Child,
        id_column: Some("id".to_string()),
        link_column: Some("childIds".to_string()),
        ..TableOptions::default()
    };

    // Act
    let table = build_from_path(path.to_str().unwrap(), &options)?;

    // Assert
    let children = table.children(table.roots()[0]);
    let names: Vec<_> = children
        .iter()
        .map(|&c| {
            table
                .value(c, "name")
                .and_then(Value::as_text)
                .unwrap_or_default()
                .to_string()
        })
        .collect();
    assert_eq!(names, vec!["b", "a"]);
    Ok(())
}

#[test]
fn given_empty_file_when_building_then_yields_empty_table() -> TableResult<()> {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_data_file(&temp, "empty.tsv", "");

    // Act
    let table = build_from_path(path.to_str().unwrap(), &TableOptions::default())?;

    // Assert
    assert!(table.schema().is_empty());
    assert_eq!(table.node_count(), 0);
    assert!(table.roots().is_empty());
    Ok(())
}
