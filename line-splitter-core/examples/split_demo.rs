use line_splitter_core::{LineSplitter, SplitterConfig};

fn main() {
    println!("Splitting sample messages...");

    let splitter = LineSplitter::new(SplitterConfig::default());

    let samples = vec![
        ("npc.greeting", r"\E0Welcome, traveller. The road to the northern village is long and the nights are cold."),
        ("npc.warning", r"\E0*\C1Careful\C0 out there, the wolves have been bold this winter and ~1 went missing./"),
        ("menu.save", "* 存档已保存。请不要在保存过程中关闭游戏，否则存档可能会损坏。"),
        ("menu.raw", "#Do not touch this one, it is laid out by hand"),
        ("title", "Options"),
    ];

    let output = splitter.process_batch(samples);

    for (key, value) in &output.entries {
        println!("{key}:");
        for line in value.split('&') {
            println!("    |{line}|");
        }
    }

    let report = &output.report;
    println!(
        "\n{} rewritten ({} changed), {} skipped, {} untouched, {} failed",
        report.rewritten, report.changed, report.skipped, report.untouched, report.failed
    );
    for diagnostic in &report.diagnostics {
        println!("  ! {diagnostic}");
    }
}
