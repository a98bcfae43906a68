/// Split comma-separated category names, dropping blanks and repeats
///
/// Accepts one or many arguments so `-c rust,web -c books` and
/// `-c rust -c web` produce the same list.
pub fn parse_names<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for arg in args {
        for name in arg.as_ref().split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}
