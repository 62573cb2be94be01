fn main() -> std::process::ExitCode {
    fileseq_lib::run()
}
