use {
    catalog::{Database, LoadMode},
    std::fs,
    tabula::{
        cmd::{self, Session},
        Config,
    },
    tempfile::tempdir,
};

fn run_script(session: &mut Session, script: &str) -> String {
    let mut output = vec![];
    cmd::run(session, script.as_bytes(), &mut output, false).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn build_search_save_reload() {
    let temp_dir = tempdir().unwrap();
    let config = Config {
        data_dir: temp_dir.path().to_path_buf(),
        load_mode: LoadMode::Trusted,
    };

    let mut session = Session::new(config.clone());
    let output = run_script(
        &mut session,
        "
        create-db company
        create-table staff id:integer salary:real name:string hired:date leave:dateInterval
        add-row staff 1;5.5;Ann;2020-03-01;2024-07-01 - 2024-07-14
        add-row staff 2;7;Bob;2021-11-30;2024-08-01 - 2024-08-02
        add-row staff 3;6.25;Cy;1999-40-40;2024-01-01 - 2024-01-02
        add-row staff 3;6.25;Cy;2022-01-10;2024-01-01,2024-01-02
        edit-row staff 1 2;7.5;Bob;2021-11-30;2024-08-01 - 2024-08-03
        search staff leave 2024-08
        save
        ",
    );

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], r#"database "company" created"#);
    assert_eq!(lines[1], r#"table "staff" created"#);
    assert_eq!(lines[2], "row 0 added");
    assert_eq!(lines[3], "row 1 added");
    assert!(lines[4].starts_with("error: invalid format: \"1999-40-40\""));
    assert!(lines[5].starts_with("error: invalid format: \"2024-01-01,2024-01-02\""));
    assert_eq!(lines[6], "row 1 edited");
    assert_eq!(
        lines[7],
        "id: integer | salary: real | name: string | hired: date | leave: dateInterval"
    );
    assert_eq!(lines[8], "1. 2 | 7.5 | Bob | 2021-11-30 | 2024-08-01 - 2024-08-03");
    assert!(lines[9].starts_with("database saved to"));
    assert_eq!(lines.len(), 10);

    let path = config.database_path("company");
    let first = fs::read(&path).unwrap();

    let mut reloaded = Session::new(config.clone());
    let output = run_script(&mut reloaded, "load-db company\nshow staff\nsave\n");
    assert_eq!(
        output.lines().nth(2),
        Some("0. 1 | 5.5 | Ann | 2020-03-01 | 2024-07-01 - 2024-07-14")
    );
    assert_eq!(fs::read(&path).unwrap(), first);

    let strict = Database::load(&path, LoadMode::Strict).unwrap();
    assert_eq!(
        strict.get_table("staff").unwrap(),
        session.database().unwrap().get_table("staff").unwrap()
    );

    temp_dir.close().unwrap();
}

#[test]
fn drop_table_and_missing_database() {
    let temp_dir = tempdir().unwrap();
    let mut session = Session::new(Config {
        data_dir: temp_dir.path().to_path_buf(),
        ..Config::default()
    });

    let output = run_script(
        &mut session,
        "load-db ghost
create-db db
create-table a n:integer
create-table b n:integer
drop-table a
drop-table a
tables
",
    );

    assert_eq!(
        output,
        format!(
            "error: file \"{}\" not found\n\
             database \"db\" created\n\
             table \"a\" created\n\
             table \"b\" created\n\
             table \"a\" deleted\n\
             error: table \"a\" does not exist\n\
             b\n",
            temp_dir.path().join("ghost.json").display()
        )
    );

    temp_dir.close().unwrap();
}
