/*!

This is the long-form manual for `karma_ranking` and `karmastats`.

## Input formats

The records are read from a spreadsheet with one row per submitted map. The first row is a
header, and the columns are found by name (their position does not matter):

| column            | content                                        |
|-------------------|------------------------------------------------|
| `name`            | title of the map                               |
| `author_login`    | login of the author, never changes             |
| `author_nickname` | display name of the author, may change         |
| `average_karma`   | score of the map, between -1 and 1             |
| `number_of_votes` | number of votes behind the score               |

Other columns are ignored. Empty cells are accepted.

The following formats are supported:
* `xlsx` Excel workbook (default). The first worksheet is used unless `--excel-worksheet-name` is given.
* `csv` Comma Separated Values with the same header.

## Which maps count

A map is left out of the analysis if any of these is true:
1. its title starts with `RHQ BONK CUP`, an optional ` -`, then a space (the versus maps of
   the competition). `RHQ BONK CUP - VS Arena` is left out, `RHQ BONK CUPertino` is kept.
2. its title starts with `SNEKULA` (exact case).
3. its title contains ` by ` in any case. Such maps were made by someone else than the account
   that submitted them. Note that titles such as `Stand by me` are also left out.
4. its title starts with `snekeground ` in any case.
5. its author login is exactly `Phil-622` (these maps belong to another event).

A map with an empty title is never left out by the title rules.

## Nicknames

Authors are grouped by nickname, but accounts may change their nickname over time. Before
grouping, every map of a login gets the first nickname found for this login, in the order of
the rows of the input. The `nicknamePolicy` option of the configuration file can select
`mostFrequent` or `last` instead.

A map without `author_login` cannot be attributed to an account: it is not counted for any
author and does not take part in the ratings. It can still be a worst or best map.

## Rankings

* **map count**: the number of maps of each author. Authors with the same count keep the order
  in which they first appear in the input.
* **rating**: for the authors with 5 maps or more, the mean of `(average_karma + 1) * 5` over
  their maps with 5 votes or more. The rating is between 0 and 10. An author with 5 maps but
  no map with 5 votes has no rating. Authors with the same rating are sorted by name.
  A map with an empty or non-numeric `average_karma` counts for its author, but is left out of
  the ratings and of the worst and best maps.

The top 10 of each ranking is printed along with the metric of the other ranking. An author of the top 10 by count who has
no rating is printed as such (or stops the program with `--strict`).

The worst and best maps are the maps with 5 votes or more that have the lowest and highest raw
`average_karma`. All the maps that share the extreme score are printed.

## Outputs

* `mapCount.svg` and `mapperRating.svg`: bar charts of the top 10 of each ranking, written in
  the output directory (`--output-dir`, default: the current directory). The charts are SVG
  files, not PNG images: any browser opens them, and they can be converted with tools such as
  `rsvg-convert` if a bitmap is needed.
* the text report on the standard output.
* with `--out`, a JSON summary of the whole analysis. With `--reference`, the summary is
  compared to a previous one and the differences are printed.

## Configuration

All the options can be given in a JSON file passed with `--config`. The options given on the
command line take precedence.

```json
{
  "inputPath": "Karma_RHQBonkCup.xlsx",
  "inputType": "xlsx",
  "excelWorksheetName": "Sheet1",
  "outputDirectory": "charts",
  "minMapsPerAuthor": 5,
  "minVotesPerMap": 5,
  "topN": 10,
  "competitionPrefix": "RHQ BONK CUP",
  "packPrefix": "SNEKULA",
  "categoryPrefix": "snekeground",
  "excludedLogin": "Phil-622",
  "nicknamePolicy": "first"
}
```

The prefixes are matched literally. An empty `excludedLogin` keeps the maps of every author.

*/
