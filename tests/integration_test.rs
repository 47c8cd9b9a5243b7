//! Integration tests for vprettier
//!
//! These tests verify that the components work together correctly

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use vprettier::lint::{lint_buffer, Category};
use vprettier::process::{beautify, clean_whitespace, run_command, CommandResult};
use vprettier::{commands_for, parse_args_from, Command, Config, CursorPos, TriggerEvent};

fn format(input: &str) -> String {
    beautify(input, CursorPos::default(), &Config::default()).0
}

#[test]
fn test_complete_entity_formatting() {
    let input = "\
entity counter is
port (
clk : in std_logic;
rst_n : in std_logic;
count_out : out std_logic_vector(7 downto 0)
);
end entity;
";
    let expected = "\
entity counter is
    port (
    clk       : in  std_logic;
    rst_n     : in  std_logic;
    count_out : out std_logic_vector(7 downto 0)
    );
end entity;
";
    assert_eq!(format(input), expected);
}

#[test]
fn test_architecture_with_process_and_case() {
    let input = "\
architecture rtl of fsm is
signal r_state : t_state;
begin
p_next : process (clk)
begin
if rising_edge(clk) then
case r_state is
when IDLE =>
r_state <= RUN;
when others =>
r_state <= IDLE;
end case;
end if;
end process;
end architecture;
";
    let out = format(input);
    let lines: Vec<&str> = out.split('\n').collect();
    assert_eq!(lines[0], "architecture rtl of fsm is");
    assert_eq!(lines[1], "    signal r_state : t_state;");
    assert_eq!(lines[2], "    begin");
    assert_eq!(lines[3], "    p_next : process(clk)");
    assert_eq!(lines[4], "        begin");
    assert_eq!(lines[5], "        if rising_edge(clk) then");
    assert_eq!(lines[6], "            case r_state is");
    assert_eq!(lines[7], "            when IDLE =>");
    assert_eq!(lines[8], "                r_state <= RUN;");
    assert_eq!(lines[9], "            when others =>");
    assert_eq!(lines[10], "                r_state <= IDLE;");
    assert_eq!(lines[11], "            end case;");
    assert_eq!(lines[12], "        end if;");
    assert_eq!(lines[13], "    end process;");
    assert_eq!(lines[14], "end architecture;");
}

#[test]
fn test_full_pipeline_idempotent() {
    let input = "\
entity top is
port (
clk : in std_logic;
d_in : in std_logic_vector(3 downto 0);
q_out : out std_logic_vector(3 downto 0)
);
end entity;

architecture rtl of top is
signal r_q : std_logic_vector(3 downto 0);
begin
p_reg : process (clk)
begin
if rising_edge(clk) then
r_q <= d_in;
end if;
end process;
q_out <= r_q;
end architecture;
";
    let once = format(input);
    let twice = format(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_signal_assignment_alignment() {
    let input = "\
a <= b;
longname <= c;
";
    let out = format(input);
    let lines: Vec<&str> = out.split('\n').collect();
    assert_eq!(lines[0], "a        <= b;");
    assert_eq!(lines[1], "longname <= c;");
}

#[test]
fn test_association_arrow_alignment() {
    let input = "\
inst_cnt : counter
port map (
clk => clk,
rst_n => rst_n,
count_out => w_count
);
";
    let out = format(input);
    let lines: Vec<&str> = out.split('\n').collect();
    assert_eq!(lines[2], "clk       => clk,");
    assert_eq!(lines[3], "rst_n     => rst_n,");
    assert_eq!(lines[4], "count_out => w_count");
}

#[test]
fn test_tab_expansion_and_blank_collapse() {
    let input = "\tx <= y;\n\n\n\n\nz <= w;\n";
    let out = format(input);
    assert_eq!(out, "x <= y;\n\nz <= w;\n");
}

#[test]
fn test_comment_lines_untouched_by_alignment() {
    let input = "\
-- ports : description
a : std_logic;
bb : std_logic;
";
    let out = format(input);
    let lines: Vec<&str> = out.split('\n').collect();
    assert_eq!(lines[0], "-- ports : description");
    assert_eq!(lines[1], "a  : std_logic;");
    assert_eq!(lines[2], "bb : std_logic;");
}

#[test]
fn test_lint_report_across_categories() {
    let source = "\
architecture rtl of top is
constant width : integer := 8;
signal my_sig : std_logic;
signal rst_n : std_logic;
type state is (IDLE, RUN);
begin
main : process (clk)
begin
end process;
lanes : for i in 0 to 3 generate
end generate;
end architecture;
";
    let report = lint_buffer(source, &Config::default());
    assert_eq!(report.offenses(Category::Constant).len(), 1);
    assert_eq!(report.offenses(Category::Constant)[0].identifier, "width");
    assert_eq!(report.offenses(Category::Signal).len(), 1);
    assert_eq!(report.offenses(Category::Signal)[0].identifier, "my_sig");
    assert_eq!(report.offenses(Category::Type).len(), 1);
    assert_eq!(report.offenses(Category::Process).len(), 1);
    assert_eq!(report.offenses(Category::Process)[0].identifier, "main");
    assert_eq!(report.offenses(Category::Generate).len(), 1);
    assert!(report.offenses(Category::Variable).is_empty());
    assert_eq!(
        report.summary(),
        "Coding rules error: constant, signal, type, p_, g_"
    );
}

#[test]
fn test_lint_instantiation_label() {
    let source = "\
u_cnt : counter
port map (
clk => clk
);
";
    let report = lint_buffer(source, &Config::default());
    let offenses = report.offenses(Category::Instance);
    assert_eq!(offenses.len(), 1);
    assert_eq!(offenses[0].row, 0);
    assert_eq!(offenses[0].identifier, "u_cnt");
}

#[test]
fn test_clean_whitespace_command() {
    let input = "q<=d ;\t\nport map  (x => y);\n";
    let out = clean_whitespace(input, &Config::default());
    assert_eq!(out, "q<=d;\nport map(x => y);\n");
}

#[test]
fn test_command_dispatch_round_trip() {
    let config = Config::default();
    let cursor = CursorPos::new(1, 2);

    match run_command(Command::Format, "x<=y;\n", cursor, &config) {
        CommandResult::Formatted { text, cursor: c } => {
            assert_eq!(text, "x <= y;\n");
            assert_eq!(c, cursor);
        }
        CommandResult::Linted(_) => panic!("expected formatted output"),
    }

    match run_command(Command::Lint, "signal bad : std_logic;\n", cursor, &config) {
        CommandResult::Linted(report) => {
            assert_eq!(report.offenses(Category::Signal).len(), 1);
        }
        CommandResult::Formatted { .. } => panic!("expected lint report"),
    }
}

#[test]
fn test_trigger_mapping_drives_commands() {
    let config = Config {
        clean_on_save: true,
        lint_on_save: true,
        ..Config::default()
    };
    let commands = commands_for(TriggerEvent::PreSave, &config);
    assert_eq!(commands, [Command::CleanWhitespace, Command::Lint]);

    // Run the mapped commands the way a host would
    let mut text = "q<=d ;\nsignal bad : std_logic;\n".to_string();
    let mut report_total = 0;
    for command in commands {
        match run_command(command, &text, CursorPos::default(), &config) {
            CommandResult::Formatted { text: t, .. } => text = t,
            CommandResult::Linted(report) => report_total = report.total(),
        }
    }
    assert_eq!(text, "q<=d;\nsignal bad : std_logic;\n");
    assert_eq!(report_total, 1);
}

#[test]
fn test_cli_args_feed_config() {
    let args = parse_args_from(vec![
        "vprettier",
        "--lint",
        "--disable-check",
        "signal",
        "top.vhd",
    ]);
    assert!(args.lint);

    let mut config = Config::default();
    for category in &args.disable_checks {
        config.check_dict.insert(category.clone(), false);
    }
    assert!(!config.check_enabled(Category::Signal));
    assert!(config.check_enabled(Category::Constant));

    let report = lint_buffer("signal bad : std_logic;\n", &config);
    assert!(report.is_clean());
}

#[test]
fn test_line_count_preserved_without_blank_runs() {
    let input = "entity e is\nport (\nclk : in std_logic\n);\nend entity;\n";
    let out = format(input);
    assert_eq!(
        out.split('\n').count(),
        input.split('\n').count(),
    );
}
