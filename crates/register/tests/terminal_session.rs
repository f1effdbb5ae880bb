use tally_register::Register;
use tally_register::cli::Terminal;
use tally_store::{FileSlot, KeyValueSlot, LEGACY_KEY, LedgerStore, STORAGE_KEY};

fn run_session(dir: &std::path::Path, script: &str) -> String {
    let mut register = Register::open(LedgerStore::new(FileSlot::new(dir)));
    let mut input = script.as_bytes();
    let mut output = Vec::new();
    Terminal::new('.')
        .run(&mut register, &mut input, &mut output)
        .expect("session should not fail on in-memory i/o");
    String::from_utf8(output).unwrap()
}

#[test]
fn a_night_at_the_stall() {
    let dir = tempfile::tempdir().unwrap();

    let out = run_session(
        dir.path(),
        "add Beto\n\
         add ana\n\
         add   \n\
         inc 1 bebidas\n\
         inc 1 bebidas\n\
         inc 1 cervezas\n\
         inc 2 pisco2x\n\
         dec 2 completos\n\
         paid 2\n\
         total\n\
         quit\n",
    );

    assert!(out.contains("added BETO"), "{out}");
    assert!(out.contains("added ANA"), "{out}");
    assert!(out.contains("a name is required"), "{out}");
    // Row 1 is ANA once sorted.
    assert!(out.contains("ANA: CERVEZAS x1 -> $4.000"), "{out}");
    assert!(out.contains("BETO: PISCO2X x1 -> $5.000"), "{out}");
    assert!(out.contains("BETO: COMPLETOS x0 -> $5.000"), "{out}");
    assert!(out.contains("BETO: PAID"), "{out}");
    assert!(out.contains("total    $9.000"), "{out}");
    assert!(out.contains("paid     $5.000"), "{out}");
    assert!(out.contains("pending  $4.000"), "{out}");

    // A fresh process sees the same ledger.
    let out = run_session(dir.path(), "list\n");
    assert!(out.starts_with("2 customers loaded."), "{out}");
    assert!(out.contains("BEBIDAS x2, CERVEZAS x1"), "{out}");
    assert!(out.contains("total $9.000"), "{out}");
}

#[test]
fn search_find_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_session(
        dir.path(),
        "add ana\nadd beto\nadd mariana\nsearch an\nfind\ndel 2\nsearch\nlist\n",
    );

    assert!(out.contains("found ANA in row 1"), "{out}");
    assert!(out.contains("deleted MARIANA"), "{out}");

    let listing = out.rsplit("> ").nth(1).unwrap_or_default();
    assert!(listing.contains("ANA"), "{out}");
    assert!(listing.contains("BETO"), "{out}");
    assert!(!listing.contains("MARIANA"), "{out}");
}

#[test]
fn reset_asks_first() {
    let dir = tempfile::tempdir().unwrap();
    run_session(dir.path(), "add ana\ninc 1 alfajores\npaid 1\n");
    let slot = FileSlot::new(dir.path());
    let before = slot.get(STORAGE_KEY).unwrap();

    let out = run_session(dir.path(), "reset\nn\n");
    assert!(out.contains("Clear every customer's consumption? [y/N]"), "{out}");
    assert!(out.contains("nothing changed"), "{out}");
    assert_eq!(slot.get(STORAGE_KEY).unwrap(), before);

    let out = run_session(dir.path(), "reset\ny\ntotal\nlist\n");
    assert!(out.contains("all consumption cleared"), "{out}");
    assert!(out.contains("total    $0"), "{out}");
    assert!(out.contains("ANA"), "{out}");
    assert!(out.contains("PAID"), "{out}");
}

#[test]
fn bad_commands_do_not_stop_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_session(dir.path(), "dance\ninc 1 empanadas\ninc 9 bebidas\nadd ana\n");
    assert!(out.contains("error: unknown command: dance"), "{out}");
    assert!(out.contains("error: unknown product: empanadas"), "{out}");
    assert!(out.contains("no customer in row 9"), "{out}");
    assert!(out.contains("added ANA"), "{out}");
}

#[test]
fn legacy_install_is_picked_up_and_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let slot = FileSlot::new(dir.path());
    slot.set(
        LEGACY_KEY,
        r#"[{"id":"0190f3a2-7b1c-7d4e-8f00-1234567890ab","nombre":"DON JUAN","choripanes":2,"pagado":false}]"#,
    )
    .unwrap();

    let out = run_session(dir.path(), "list\ninc 1 choripanes\n");
    assert!(out.contains("DON JUAN"), "{out}");
    assert!(out.contains("CHORIPANES x3 -> $4.500"), "{out}");

    let migrated = slot.get(STORAGE_KEY).unwrap().unwrap();
    assert!(migrated.contains("\"choripanes\":3"), "{migrated}");
    assert!(slot.get(LEGACY_KEY).unwrap().is_some());
}

#[test]
fn corrupt_file_starts_empty_and_is_overwritten_on_first_change() {
    let dir = tempfile::tempdir().unwrap();
    let slot = FileSlot::new(dir.path());
    slot.set(STORAGE_KEY, "definitely not json").unwrap();

    let out = run_session(dir.path(), "list\nadd ana\n");
    assert!(out.starts_with("0 customers loaded."), "{out}");
    assert!(out.contains("(no customers)"), "{out}");

    let blob = slot.get(STORAGE_KEY).unwrap().unwrap();
    assert!(blob.starts_with("[{\"id\":"), "{blob}");
}
