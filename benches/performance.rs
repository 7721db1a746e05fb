use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tangle::core::{AliasTable, ScanCoordinator};

fn benchmark_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("project_scan");

    let test_dir = std::env::temp_dir().join("tangle_bench");
    std::fs::create_dir_all(&test_dir).unwrap();

    // Python files with a mix of project-local and external imports
    for i in 0..50 {
        let content = format!(
            "import os\nimport json, sys\nfrom mod{} import helper\n\ndef work():\n    return {}\n",
            (i + 1) % 50,
            i
        );
        std::fs::write(test_dir.join(format!("mod{}.py", i)), content).unwrap();
    }

    // C files chained through local includes
    for i in 0..50 {
        let content = format!(
            "#include \"unit{}.h\"\n#include <stdio.h>\n\nint unit{}(void) {{ return {}; }}\n",
            (i + 1) % 50,
            i,
            i
        );
        std::fs::write(test_dir.join(format!("unit{}.c", i)), content).unwrap();
        std::fs::write(
            test_dir.join(format!("unit{}.h", i)),
            format!("int unit{}(void);\n", i),
        )
        .unwrap();
    }

    let aliases = AliasTable::new();

    group.bench_function("scan_150_files", |b| {
        b.iter(|| {
            let outcome = ScanCoordinator::with_defaults()
                .scan(black_box(&test_dir), black_box(&aliases))
                .unwrap();
            black_box(outcome.stats.dependencies_found)
        })
    });

    group.finish();
    let _ = std::fs::remove_dir_all(&test_dir);
}

criterion_group!(benches, benchmark_scan);
criterion_main!(benches);
