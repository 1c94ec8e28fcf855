//! 探测基准测试
//!
//! 测试检测器解析、超时解析和配置处理的性能

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;
use uptime_probe::config::{validate_config, Config};
use uptime_probe::health::{CheckResult, CheckerRegistry, TimeoutResolver, TracingObserver};

const CONFIG_TOML: &str = r#"
[global]
log_level = "info"
max_concurrent_checks = 8

[[monitors]]
name = "homepage"
url = "https://example.com/"
timeout = "5s"
kind = "http-content"
content = "Example\\s+Domain"

[[monitors]]
name = "api"
url = "https://example.com/health"
timeout = "2s"
"#;

/// 检测器解析基准测试
fn registry_benchmark(c: &mut Criterion) {
    let registry = CheckerRegistry::default();

    c.bench_function("registry_resolve_known", |b| {
        b.iter(|| black_box(registry.resolve(black_box("http-content")).is_ok()));
    });

    c.bench_function("registry_resolve_unknown", |b| {
        b.iter(|| black_box(registry.resolve(black_box("smtp")).is_err()));
    });
}

/// 超时解析基准测试
fn timeout_benchmark(c: &mut Criterion) {
    let resolver = TimeoutResolver::new(Arc::new(TracingObserver));

    c.bench_function("timeout_resolve_valid", |b| {
        b.iter(|| black_box(resolver.resolve(black_box("1h30m"))));
    });
}

/// 配置与结果处理基准测试
fn config_benchmark(c: &mut Criterion) {
    c.bench_function("config_parse_and_validate", |b| {
        b.iter(|| {
            let config: Config = toml::from_str(black_box(CONFIG_TOML)).unwrap();
            black_box(validate_config(&config).is_ok())
        });
    });

    c.bench_function("check_result_serialization", |b| {
        let result = CheckResult::failure("Missing content Example", Duration::from_millis(120));
        b.iter(|| black_box(serde_json::to_string(&result).unwrap()));
    });
}

criterion_group!(benches, registry_benchmark, timeout_benchmark, config_benchmark);
criterion_main!(benches);
