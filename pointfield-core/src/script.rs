/// Scene script parser
///
/// A script is line oriented. `object N` selects the object whose list the
/// following lines fill; each other line is one operation:
///
/// ```text
/// # spinning crate
/// object 0
///   show 0
///   translate z 64
///   rotate x 30
///   scale y 1.5
///   hide
/// ```
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map, map_res, opt, rest, success, value},
    number::complete::float,
    sequence::{pair, preceded},
    IResult,
};
use std::path::Path;

use crate::error::ScriptError;
use crate::op::{Axis, Operation};
use crate::scene::Scene;

/// Operations for one object, in slot order
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectScript {
    pub object: usize,
    pub ops: Vec<Operation>,
}

/// A parsed scene script
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneScript {
    objects: Vec<ObjectScript>,
}

#[derive(Debug, Clone, PartialEq)]
enum Line {
    Object(usize),
    Op(Operation),
    Blank,
}

impl SceneScript {
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut script = SceneScript::default();
        let mut current: Option<usize> = None;

        for (number, raw) in text.lines().enumerate() {
            let line = number + 1;
            let parsed = match all_consuming(parse_line)(raw) {
                Ok((_, parsed)) => parsed,
                Err(_) => {
                    return Err(ScriptError::Parse {
                        line,
                        text: raw.trim().to_string(),
                    })
                }
            };

            match parsed {
                Line::Blank => {}
                Line::Object(object) => current = Some(script.entry(object)),
                Line::Op(op) => {
                    let index = current.ok_or(ScriptError::NoObject { line })?;
                    script.objects[index].ops.push(op);
                }
            }
        }

        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn objects(&self) -> &[ObjectScript] {
        &self.objects
    }

    /// Write every object's operations into the scene, followed by `End`.
    ///
    /// The whole script is checked against the scene's limits first; on error
    /// the scene is left untouched.
    pub fn apply(&self, scene: &mut Scene) -> Result<(), ScriptError> {
        let limits = *scene.limits();
        for entry in &self.objects {
            if entry.object >= limits.objects {
                return Err(ScriptError::ObjectOutOfRange {
                    object: entry.object,
                    limit: limits.objects,
                });
            }
            if entry.ops.len() > limits.op_slots {
                return Err(ScriptError::SlotOverflow {
                    object: entry.object,
                    needed: entry.ops.len(),
                    limit: limits.op_slots,
                });
            }
        }

        for entry in &self.objects {
            scene.clear_object(entry.object);
            for (slot, op) in entry.ops.iter().enumerate() {
                scene.set_operation(entry.object, slot, *op);
            }
        }
        Ok(())
    }

    /// Index of the block for `object`, creating it on first use
    fn entry(&mut self, object: usize) -> usize {
        match self.objects.iter().position(|o| o.object == object) {
            Some(index) => index,
            None => {
                self.objects.push(ObjectScript {
                    object,
                    ops: Vec::new(),
                });
                self.objects.len() - 1
            }
        }
    }
}

fn parse_line(input: &str) -> IResult<&str, Line> {
    let (input, _) = space0(input)?;
    let (input, line) = alt((
        map(preceded(pair(tag("object"), space1), index), Line::Object),
        map(operation, Line::Op),
        success(Line::Blank),
    ))(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = opt(preceded(char('#'), rest))(input)?;
    Ok((input, line))
}

fn operation(input: &str) -> IResult<&str, Operation> {
    alt((
        map(preceded(pair(tag("show"), space1), index), Operation::ShowImage),
        value(Operation::Hide, tag("hide")),
        value(Operation::End, tag("end")),
        geometric,
    ))(input)
}

fn geometric(input: &str) -> IResult<&str, Operation> {
    type Build = fn(Axis, f32) -> Operation;
    let (input, build) = alt((
        value(Operation::Rotate as Build, tag("rotate")),
        value(Operation::Translate as Build, tag("translate")),
        value(Operation::Scale as Build, tag("scale")),
    ))(input)?;
    let (input, axis) = preceded(space1, axis)(input)?;
    let (input, amount) = preceded(space1, float)(input)?;
    Ok((input, build(axis, amount)))
}

fn axis(input: &str) -> IResult<&str, Axis> {
    alt((
        value(Axis::X, char('x')),
        value(Axis::Y, char('y')),
        value(Axis::Z, char('z')),
    ))(input)
}

fn index(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneLimits;

    const CRATE: &str = "\
# spinning crate
object 0
  show 0
  translate z 64   # push back
  rotate x 30
  rotate y -45.5
  scale z 2

";

    #[test]
    fn test_parse_crate_script() {
        let script = SceneScript::parse(CRATE).unwrap();
        assert_eq!(
            script.objects(),
            &[ObjectScript {
                object: 0,
                ops: vec![
                    Operation::ShowImage(0),
                    Operation::Translate(Axis::Z, 64.0),
                    Operation::Rotate(Axis::X, 30.0),
                    Operation::Rotate(Axis::Y, -45.5),
                    Operation::Scale(Axis::Z, 2.0),
                ],
            }]
        );
    }

    #[test]
    fn test_repeated_object_appends() {
        let script = SceneScript::parse("object 1\nshow 0\nobject 0\nhide\nobject 1\nend\n").unwrap();
        assert_eq!(script.objects().len(), 2);
        assert_eq!(
            script.objects()[0].ops,
            vec![Operation::ShowImage(0), Operation::End]
        );
    }

    #[test]
    fn test_parse_errors_carry_line() {
        match SceneScript::parse("object 0\nshow 0\nrotate w 10\n") {
            Err(ScriptError::Parse { line, text }) => {
                assert_eq!(line, 3);
                assert_eq!(text, "rotate w 10");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            SceneScript::parse("object 0\nhidden\n"),
            Err(ScriptError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            SceneScript::parse("show 0\n"),
            Err(ScriptError::NoObject { line: 1 })
        ));
    }

    #[test]
    fn test_apply_writes_ops_and_end() {
        let mut scene = Scene::new(SceneLimits {
            op_slots: 8,
            ..SceneLimits::default()
        });
        for slot in 0..8 {
            scene.set_operation(0, slot, Operation::Hide);
        }

        SceneScript::parse(CRATE).unwrap().apply(&mut scene).unwrap();

        let ops = scene.object(0).unwrap();
        assert_eq!(ops.active().count(), 5);
        assert_eq!(ops.get(5), Some(Operation::End));
        assert_eq!(ops.get(7), Some(Operation::End));
    }

    #[test]
    fn test_apply_checks_limits_first() {
        let mut scene = Scene::new(SceneLimits {
            op_slots: 4,
            ..SceneLimits::default()
        });
        scene.set_operation(0, 0, Operation::ShowImage(0));
        let before = scene.objects().to_vec();

        let overflow = SceneScript::parse(CRATE).unwrap().apply(&mut scene);
        assert!(matches!(
            overflow,
            Err(ScriptError::SlotOverflow { needed: 5, limit: 4, .. })
        ));

        let missing = SceneScript::parse("object 3\nhide\n").unwrap().apply(&mut scene);
        assert!(matches!(
            missing,
            Err(ScriptError::ObjectOutOfRange { object: 3, limit: 1 })
        ));
        assert_eq!(scene.objects(), &before[..]);
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CRATE.as_bytes()).unwrap();
        let script = SceneScript::load(file.path()).unwrap();
        assert_eq!(script.objects()[0].ops.len(), 5);
    }
}
