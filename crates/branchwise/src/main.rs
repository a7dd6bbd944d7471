fn main() {
  if let Err(err) = branchwise::run() {
    branchwise::log_error!("{:#}", err);
    std::process::exit(1);
  }
}
