//! Inputs shared by the benchmarks.

/// A program with `procs` chained procedures, each holding a loop around a
/// branch so Next* has large strongly connected components.
pub fn synthetic_program(procs: usize, body: usize) -> String {
    let mut src = String::new();
    for p in 0..procs {
        src.push_str(&format!("procedure p{p} {{\n    read x;\n"));
        src.push_str("    while (x > 0) {\n        if (x > y) then {\n");
        for i in 0..body {
            src.push_str(&format!("            v{i} = v{i} + x * {i};\n"));
        }
        src.push_str("        } else {\n");
        for i in 0..body {
            src.push_str(&format!("            y = v{i} - y;\n"));
        }
        if p + 1 < procs {
            src.push_str(&format!("            call p{};\n", p + 1));
        }
        src.push_str("        }\n        x = x - 1;\n    }\n    print y;\n}\n");
    }
    src
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_program_parses() {
        let parsed = parsers::parse_program(&synthetic_program(3, 4)).unwrap();
        assert_eq!(parsed.program.procedures.len(), 3);
        // read, while, if, 4 + 4 branch statements, call, decrement, print
        assert_eq!(parsed.numbers.len(), 3 * 14 - 1);
    }
}
