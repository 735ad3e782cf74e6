use crate::common::*;

#[doc = "로그 라인 출력 형식 (시간/레벨/메시지)"]
fn log_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] [{}] T[{:?}] {}",
        now.now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        std::thread::current().id(),
        &record.args()
    )
}

#[doc = r#"
    전역 로거를 설정하는 함수.

    1. `RUST_LOG` 환경변수로 로그 레벨을 지정받는다 (미설정 시 info)
    2. `logs/` 디렉토리 하위에 일 단위로 로그 파일을 rotate 한다
    3. 로그 파일은 최대 30일까지 보관 후 삭제
    4. 모든 로그는 stdout 에도 복제 출력

    # Panics
    로거 초기화에 실패한 경우 애플리케이션 종료
"#]
pub fn set_global_logger() {
    let log_level: String = env::var("RUST_LOG").unwrap_or_else(|_| String::from("info"));

    Logger::try_with_str(log_level)
        .expect("Failed to build logger spec")
        .log_to_file(FileSpec::default().directory("logs"))
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(30),
        )
        .duplicate_to_stdout(Duplicate::All)
        .format(log_format)
        .start()
        .expect("Failed to initialize logger");
}
