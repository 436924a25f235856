use criterion::{black_box, criterion_group, criterion_main, Criterion};
use svmcmd::{active_fields, validate, FieldId, KernelType, Operation, ParameterSet, SvmType};

fn bench_active_fields(c: &mut Criterion) {
    c.bench_function("active_fields_all_pairs", |b| {
        b.iter(|| {
            for svm_type in SvmType::ALL {
                for kernel_type in KernelType::ALL {
                    black_box(active_fields(black_box(svm_type), black_box(kernel_type)));
                }
            }
        })
    });
}

fn bench_train_command(c: &mut Criterion) {
    let params = ParameterSet::new()
        .with_kernel_type(KernelType::Polynomial)
        .with_text(FieldId::Gamma, "0.5")
        .with_text(FieldId::CrossValidationFolds, "5")
        .with_class_weight(1, 2.0)
        .with_class_weight(-1, 0.5)
        .with_data_file("train.dat")
        .with_model_file("train.model");

    c.bench_function("validate_and_assemble_train", |b| {
        b.iter(|| {
            let validated = validate(black_box(&params), Operation::Train);
            black_box(validated.map(|v| v.command_line()))
        })
    });
}

criterion_group!(benches, bench_active_fields, bench_train_command);
criterion_main!(benches);
