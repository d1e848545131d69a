use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::one_of;
use nom::combinator::{all_consuming, fail, map_res, opt};
use nom::multi::{many0, many1};
use nom::sequence::preceded;
use nom::{IResult, Parser};

use crate::notation::descriptor::{BattedBall, PlayDescriptor, Position, ResultKind};

pub(crate) type ParserError<'a> = nom::error::VerboseError<&'a str>;
pub(crate) type ParserResult<'a, Out> = IResult<&'a str, Out, ParserError<'a>>;

pub(crate) fn parse_descriptor(input: &str) -> ParserResult<PlayDescriptor> {
    all_consuming(alt((parse_out, parse_hit, parse_bare))).parse(input)
}

fn parse_position(input: &str) -> ParserResult<Position> {
    map_res(one_of("123456789"), |digit| {
        Position::try_from(digit as u8 - b'0')
    })
    .parse(input)
}

fn parse_batted_ball(input: &str) -> ParserResult<BattedBall> {
    alt((
        tag("G").map(|_| BattedBall::Grounder),
        tag("L").map(|_| BattedBall::LineDrive),
        tag("F").map(|_| BattedBall::FlyBall),
        tag("P").map(|_| BattedBall::PopUp),
        tag("B").map(|_| BattedBall::Bunt),
    ))
    .parse(input)
}

fn parse_bare(input: &str) -> ParserResult<PlayDescriptor> {
    alt((
        tag("K").map(|_| ResultKind::Strikeout),
        tag("W").map(|_| ResultKind::Walk),
        tag("HP").map(|_| ResultKind::HitByPitch),
        tag("IW").map(|_| ResultKind::IntentionalWalk),
        tag("CI").map(|_| ResultKind::CatcherInterference),
        tag("ND").map(|_| ResultKind::NoPlay),
    ))
    .map(PlayDescriptor::bare)
    .parse(input)
}

fn parse_hit(input: &str) -> ParserResult<PlayDescriptor> {
    // NOTE order matters here. Two-letter codes must come before their
    // one-letter prefixes (SF/SH before S).
    let (input, result) = alt((
        tag("HR").map(|_| ResultKind::HomeRun),
        tag("SF").map(|_| ResultKind::SacFly),
        tag("SH").map(|_| ResultKind::SacBunt),
        tag("FC").map(|_| ResultKind::FieldersChoice),
        tag("OA").map(|_| ResultKind::OutAdvancing),
        tag("S").map(|_| ResultKind::Single),
        tag("D").map(|_| ResultKind::Double),
        tag("T").map(|_| ResultKind::Triple),
        tag("E").map(|_| ResultKind::Error),
    ))
    .parse(input)?;
    let (input, first) = parse_position(input)?;
    let (input, _) = tag("/").parse(input)?;
    let (input, batted) = parse_batted_ball(input)?;
    let (input, sequence) = many0(parse_position).parse(input)?;

    // The leading fielder repeats as the head of the trailing sequence;
    // an empty trailing sequence is shorthand for just the leading fielder.
    if let Some(&lead) = sequence.first() {
        if lead != first {
            return fail(input);
        }
    }
    let fielders = if sequence.is_empty() { vec![first] } else { sequence };

    Ok((
        input,
        PlayDescriptor {
            result,
            batted: Some(batted),
            fielders,
        },
    ))
}

fn parse_out(input: &str) -> ParserResult<PlayDescriptor> {
    let (input, fielders) = many1(parse_position).parse(input)?;
    let (input, _) = tag("/").parse(input)?;
    let (input, batted) = parse_batted_ball(input)?;
    let (input, modifier) = opt(preceded(tag("/"), parse_out_modifier)).parse(input)?;

    Ok((
        input,
        PlayDescriptor {
            result: modifier.unwrap_or(ResultKind::GenericOut),
            batted: Some(batted),
            fielders,
        },
    ))
}

fn parse_out_modifier(input: &str) -> ParserResult<ResultKind> {
    alt((
        tag("GDP").map(|_| ResultKind::GroundedIntoDP),
        tag("LDP").map(|_| ResultKind::LinedIntoDP),
        tag("DP").map(|_| ResultKind::DoublePlay),
        tag("TP").map(|_| ResultKind::TriplePlay),
        tag("FO").map(|_| ResultKind::ForceOut),
        tag("UO").map(|_| ResultKind::UnassistedOut),
    ))
    .parse(input)
}
