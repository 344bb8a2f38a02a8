use super::parse_token;
use crate::db::core::Net;
use anyhow::{Context, Result, bail};

/// Connection file: the first token is the net count and the rest of that line
/// is ignored (blank lines before it are skipped); each following line lists the 1-based modules of one net,
/// driver first.
pub fn parse(filename: &str, module_count: usize) -> Result<Vec<Net>> {
    log::info!("Parsing Nets: {}", filename);
    let text = std::fs::read_to_string(filename)
        .with_context(|| format!("Unable to open connection file: {}", filename))?;
    from_str(&text, module_count)
        .with_context(|| format!("Invalid connection file '{}'", filename))
}

pub fn from_str(text: &str, module_count: usize) -> Result<Vec<Net>> {
    let mut lines = text.lines();

    let header = lines.by_ref().find(|line| !line.trim().is_empty());
    let count: usize = match header.and_then(|line| line.split_whitespace().next()) {
        Some(token) => parse_token(token, "net count")?,
        None => bail!("Missing net count"),
    };

    let mut nets = Vec::new();
    for n in 0..count {
        let Some(line) = lines.next() else {
            bail!("Expected {} nets, found {}", count, n);
        };
        let indices = line
            .split_whitespace()
            .map(|token| parse_token::<usize>(token, &format!("module index in net {}", n + 1)))
            .collect::<Result<Vec<_>>>()?;
        nets.push(Net::from_one_based(n, &indices, module_count)?);
    }

    let degenerate = nets.iter().filter(|net| net.len() < 2).count();
    if degenerate > 0 {
        log::debug!("{} nets have fewer than two modules", degenerate);
    }

    Ok(nets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::error::LayoutError;
    use crate::db::indices::ModuleId;

    #[test]
    fn reads_variable_length_nets() {
        let nets = from_str("3 nets follow\n1 2\n\n3 1 2\n", 3).unwrap();
        assert_eq!(nets.len(), 3);
        assert_eq!(nets[0].pins(), &[ModuleId::new(0), ModuleId::new(1)]);
        assert!(nets[1].is_empty());
        assert_eq!(nets[2].driver(), Some(ModuleId::new(2)));
        assert_eq!(nets[2].sinks().len(), 2);
    }

    #[test]
    fn zero_nets() {
        assert!(from_str("0\n", 0).unwrap().is_empty());
    }

    #[test]
    fn rejects_unknown_module() {
        let err = from_str("1\n1 5\n", 2).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LayoutError>(),
            Some(&LayoutError::UnknownModule {
                net: 1,
                module: 5,
                count: 2
            })
        );
    }

    #[test]
    fn rejects_zero_index() {
        let err = from_str("1\n0 1\n", 2).unwrap_err();
        assert!(err.to_string().contains("unknown module 0"));
    }

    #[test]
    fn rejects_missing_lines() {
        let err = from_str("2\n1 2\n", 2).unwrap_err();
        assert!(err.to_string().contains("Expected 2 nets, found 1"));
    }

    #[test]
    fn blank_lines_before_count_are_skipped() {
        let nets = from_str("\n  \n2\n1 2\n2 1\n", 2).unwrap();
        assert_eq!(nets.len(), 2);
        assert_eq!(nets[1].driver(), Some(ModuleId::new(1)));
        assert!(from_str("\n\n", 2).is_err());
    }

    #[test]
    fn huge_count_is_an_error_not_an_allocation() {
        let err = from_str("18446744073709551615\n1 2\n", 2).unwrap_err();
        assert!(err.to_string().contains("found 1"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(from_str("1\n1 two\n", 2).is_err());
        assert!(from_str("", 2).is_err());
        assert!(from_str("x\n", 2).is_err());
    }
}
