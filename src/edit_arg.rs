use std::str::FromStr;

use tessel_geom::Vec3;

/// A block edit given on the command line as `x,y,z=name`. The name `air`
/// (or an empty name) clears the block.
#[derive(Clone, Debug, PartialEq)]
pub struct EditCommand {
    pub position: Vec3,
    pub block: Option<String>,
}

impl FromStr for EditCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (pos, name) = s
            .split_once('=')
            .ok_or_else(|| format!("expected x,y,z=name, got '{s}'"))?;
        let parts: Vec<&str> = pos.split(',').map(str::trim).collect();
        let [x, y, z] = parts.as_slice() else {
            return Err(format!("expected three coordinates in '{pos}'"));
        };
        let num = |v: &str| v.parse::<f32>().map_err(|e| format!("bad coordinate '{v}': {e}"));
        let name = name.trim();
        Ok(Self {
            position: Vec3::new(num(x)?, num(y)?, num(z)?),
            block: (!name.is_empty() && name != "air").then(|| name.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_edits() {
        let e: EditCommand = "1, 64.4, -3=stone".parse().unwrap();
        assert_eq!(e.position, Vec3::new(1.0, 64.4, -3.0));
        assert_eq!(e.block.as_deref(), Some("stone"));
        assert_eq!("0,0,0=air".parse::<EditCommand>().unwrap().block, None);
        assert_eq!("0,0,0=".parse::<EditCommand>().unwrap().block, None);
        assert!("0,0=stone".parse::<EditCommand>().is_err());
        assert!("0,0,0".parse::<EditCommand>().is_err());
        assert!("a,0,0=stone".parse::<EditCommand>().is_err());
    }
}
