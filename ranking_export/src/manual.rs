/*!

This is the long-form manual for `ranking_export` and `rankex`.

## Input

The input is the "Survey Responses" sheet of the surveys spreadsheet, exported
either as CSV or as an Excel workbook (`.xlsx`). Each row is one response.

If the first cell of the first row is `response_id`, the first row is read as the
names of the columns. Otherwise, the columns are expected in the order in which the
survey form writes them (see [`RESPONSE_COLUMNS`](crate::RESPONSE_COLUMNS)).

Only the rows of the requested survey (column `survey_id`) are exported.

The values are free text, as typed by the firms. The numbers are read leniently:

| field | reading |
|-------|---------|
| `revenue_current`, `revenue_prior_1`, `revenue_prior_2` | millions of dollars; `$` and `,` are ignored; blank, zero, unreadable or `DND` print as `DND` |
| `revenue_dnd` | `TRUE` if the firm does not disclose its revenues |
| `num_employees` | whole number; `,` is ignored |
| `pct_k12` ... `pct_other` | percentage of the work of the firm in each market |
| `state` | two-letter code; blank means `UT` |

A value that cannot be read never stops the export. It counts as zero for the rankings.

## Rankings

The firms are split in four groups:

1. firms from Utah that disclosed revenues, by decreasing current revenue,
2. firms from Utah that did not disclose revenues, by decreasing number of employees,
3. firms from other states that disclosed revenues, by decreasing current revenue,
4. firms from other states that did not disclose revenues, by decreasing number of employees.

A firm did not disclose revenues if `revenue_dnd` is `TRUE` or if its current revenue
reads `DND`. Firms with the same revenue (or number of employees) are kept in the order of
the sheet: there is no secondary ranking key.

The three top markets of a firm are the markets with the largest percentages. Ties
are listed in the order of the survey form: K-12, Higher Ed, Civic/Inst., Healthcare,
Office, Resort/Hosp., Multi-Family, Comm/Retail, Sports/Rec, Industrial, Other.

## Output

Two documents are produced:
* `{year}_RankingsExport.txt`: groups 1 and 2 above. Group 2 comes after the title
  `Firms that Did Not Disclose Revenues (listed by # of employees)`.
* `{year}_RankingsExport_OutOfState.txt`: groups 3 then 4, without separate titles.
  This file is only written when there is at least one firm from another state.

Cells are separated by tabs and lines by `\n`. Each firm takes three lines:

| line | cells |
|------|-------|
| 1 | name, phone, year established, top executive, largest project completed, employees, revenue (3 years), market #1, % |
| 2 | address, website, -, title, largest upcoming project, licensed architects, -, -, -, market #2, % |
| 3 | city, state and zip, -, -, years at firm, -, LEED AP, -, -, -, market #3, % |

The edition number in the introduction counts from 2012: the 2026 survey publishes the
14th annual list.

With `--format json`, the output is a JSON object instead:

```json
{ "utah": "2026 Top Utah ...", "outOfState": null }
```

## Command line

```bash
rankex -i responses.csv --survey-id ARCH-2026 --surveys surveys.csv
```

The survey year is read from the `year` column of the "Surveys" sheet, or given with `--year`.
The options can also be provided in a JSON configuration file with `--config`:

```json
{
  "surveyId": "ARCH-2026",
  "responsesPath": "responses.xlsx",
  "inputType": "xlsx",
  "excelWorksheetName": "Survey Responses",
  "surveysPath": "surveys.csv",
  "outputDirectory": "out",
  "referencePath": "2026_RankingsExport.txt",
  "strict": true
}
```

Relative paths in the configuration file are relative to the directory of the file.

With `--strict`, the columns of the responses sheet must match the expected columns
exactly. Without it, missing columns are blank and extra columns are ignored, with a warning.

With `--reference`, the produced rankings are compared with a previous export, and
the differences are printed.

*/
